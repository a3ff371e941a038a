//! Page configuration.
//!
//! Pages are configured with the image handler path and the layout
//! breakpoints. The browser entry points accept either a bare handler path
//! or a full JSON configuration; the preview runner reads it from the
//! scenario file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLUMN_WIDTH, DEFAULT_IMAGE_HANDLER_PATH, DEFAULT_STACKED_HEIGHT,
    DEFAULT_STACKED_WIDTH,
};
use crate::layout::LayoutMode;

/// Log level setting for the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Configuration of one page controller set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Image handler endpoint, used for both uploads and listings
    #[serde(default = "default_image_handler_path")]
    pub image_handler_path: String,

    /// Pictures pane breakpoints
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_image_handler_path() -> String {
    DEFAULT_IMAGE_HANDLER_PATH.to_string()
}

/// Breakpoints of the two-state pictures pane layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pane width selecting the column layout
    pub column_width: f64,
    /// Pane width selecting the stacked layout
    pub stacked_width: f64,
    /// Pane height forced in the stacked layout
    pub stacked_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            stacked_width: DEFAULT_STACKED_WIDTH,
            stacked_height: DEFAULT_STACKED_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Layout selected by a rendered pane width.
    ///
    /// `width` is the content-box width, as the stylesheet breakpoints are
    /// written for it. Widths are compared after rounding to whole pixels;
    /// anything other than the two breakpoints selects nothing.
    pub fn mode_for_width(&self, width: f64) -> Option<LayoutMode> {
        let width = width.round();
        if width == self.column_width.round() {
            Some(LayoutMode::Column)
        } else if width == self.stacked_width.round() {
            Some(LayoutMode::Stacked)
        } else {
            None
        }
    }
}

impl PageConfig {
    /// Create a configuration pointing at the given image handler path.
    pub fn new(image_handler_path: impl Into<String>) -> Self {
        Self {
            image_handler_path: image_handler_path.into(),
            ..Self::default()
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check version compatibility and required values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: self.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if self.image_handler_path.trim().is_empty() {
            return Err(ConfigError::EmptyHandlerPath);
        }

        Ok(())
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            image_handler_path: default_image_handler_path(),
            layout: LayoutConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// No image handler path configured
    #[error("Image handler path is empty")]
    EmptyHandlerPath,
}
