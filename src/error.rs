//! Error types for the page controllers.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while binding a page or talking to the image handler.
#[derive(Error, Debug)]
pub enum PageError {
    /// Element required by a controller is absent from the page
    #[error("Missing required element #{id}")]
    MissingElement {
        /// Id (or class, for scoped lookups) of the missing element
        id: String,
    },

    /// Item card without a usable identifier
    #[error("Item card {index} has no identifier")]
    MissingItemIdentifier {
        /// Position of the card in document order
        index: usize,
    },

    /// Item card without one of its inner elements
    #[error("Item card {index} has no .{class} element")]
    MissingCardElement {
        /// Position of the card in document order
        index: usize,
        /// Class of the missing element
        class: String,
    },

    /// Network error or request construction failure
    #[error("Request to '{url}' failed: {message}")]
    Request {
        /// Requested URL
        url: String,
        /// Description of the failure
        message: String,
    },

    /// Endpoint answered with a non-2xx status
    #[error("Request to '{url}' returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Listing body is not a JSON array of strings
    #[error("Invalid image listing: {0}")]
    Listing(#[from] serde_json::Error),

    /// Local file could not be read
    #[error("Failed to read file '{name}': {message}")]
    FileRead {
        /// File name as reported by the browser
        name: String,
        /// Description of the failure
        message: String,
    },

    /// Invalid page configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PageError {
    /// Create a missing element error.
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Create a request error.
    pub fn request(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Create a file read error.
    pub fn file_read(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileRead {
            name: name.into(),
            message: message.into(),
        }
    }
}
