//! Canned image handler for tests and the headless preview.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::{ImageService, LocalFile, listing_url};
use crate::error::PageError;

/// Status returned by the fixture for rejected requests, as the real
/// handler answers on any failure.
const REJECTED_STATUS: u16 = 400;

/// File with predetermined contents and upload outcome.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureFile {
    /// File name
    pub name: String,
    /// Declared MIME type
    #[serde(default)]
    pub mime_type: String,
    /// Contents returned by a local read
    #[serde(default)]
    pub data_url: String,
    /// The handler refuses this upload
    #[serde(default)]
    pub reject_upload: bool,
    /// Local reads of this file fail
    #[serde(default)]
    pub unreadable: bool,
}

impl FixtureFile {
    /// Readable file accepted by the handler.
    pub fn new(name: &str, mime_type: &str, data_url: &str) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            data_url: data_url.to_string(),
            reject_upload: false,
            unreadable: false,
        }
    }

    /// Same file, refused by the handler.
    pub fn rejected(mut self) -> Self {
        self.reject_upload = true;
        self
    }
}

impl LocalFile for FixtureFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    async fn read_data_url(&self) -> Result<String, PageError> {
        if self.unreadable {
            return Err(PageError::file_read(&self.name, "unreadable fixture"));
        }
        Ok(self.data_url.clone())
    }
}

/// Image handler answering from in-memory listings and recording requests.
#[derive(Debug, Default)]
pub struct FixtureService {
    handler_path: String,
    listings: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    requests: RefCell<Vec<String>>,
}

impl FixtureService {
    /// Empty handler mounted at `handler_path`.
    pub fn new(handler_path: &str) -> Self {
        Self {
            handler_path: handler_path.to_string(),
            ..Self::default()
        }
    }

    /// Answer listings for `identifier` (`None` for the form listing) with `urls`.
    pub fn with_listing(mut self, identifier: Option<&str>, urls: &[&str]) -> Self {
        self.set_listing(identifier, urls.iter().map(|url| url.to_string()).collect());
        self
    }

    /// Make listings for `identifier` fail.
    pub fn with_failing_listing(mut self, identifier: Option<&str>) -> Self {
        self.set_failing(identifier);
        self
    }

    /// Register a listing.
    pub fn set_listing(&mut self, identifier: Option<&str>, urls: Vec<String>) {
        self.listings
            .insert(identifier.unwrap_or_default().to_string(), urls);
    }

    /// Register a failing listing.
    pub fn set_failing(&mut self, identifier: Option<&str>) {
        self.failing
            .insert(identifier.unwrap_or_default().to_string());
    }

    /// Requests received so far, as `METHOD url` lines.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ImageService for FixtureService {
    type File = FixtureFile;

    async fn list_images(&self, identifier: Option<&str>) -> Result<Vec<String>, PageError> {
        let url = listing_url(&self.handler_path, identifier);
        self.requests.borrow_mut().push(format!("GET {url}"));

        let key = identifier.unwrap_or_default();
        if self.failing.contains(key) {
            return Err(PageError::status(url, REJECTED_STATUS));
        }
        // The handler answers an empty list for unknown items
        Ok(self.listings.get(key).cloned().unwrap_or_default())
    }

    async fn upload(&self, file: &FixtureFile) -> Result<(), PageError> {
        self.requests
            .borrow_mut()
            .push(format!("POST {} {}", self.handler_path, file.name));

        if file.reject_upload {
            return Err(PageError::status(&self.handler_path, REJECTED_STATUS));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_lookup_and_recording() {
        let service = FixtureService::new("image_handler")
            .with_listing(Some("42"), &["/img/1.png"])
            .with_failing_listing(Some("7"));

        let images = pollster::block_on(service.list_images(Some("42"))).unwrap();
        assert_eq!(images, vec!["/img/1.png".to_string()]);

        let unknown = pollster::block_on(service.list_images(Some("3"))).unwrap();
        assert!(unknown.is_empty());

        let failed = pollster::block_on(service.list_images(Some("7")));
        assert!(matches!(failed, Err(PageError::Status { status: 400, .. })));

        assert_eq!(
            service.requests(),
            vec![
                "GET image_handler?identifier=42",
                "GET image_handler?identifier=3",
                "GET image_handler?identifier=7",
            ]
        );
    }

    #[test]
    fn test_upload_outcome() {
        let service = FixtureService::new("image_handler");
        let good = FixtureFile::new("a.png", "image/png", "data:image/png;base64,AA==");
        let bad = good.clone().rejected();

        assert!(pollster::block_on(service.upload(&good)).is_ok());
        assert!(pollster::block_on(service.upload(&bad)).is_err());
        assert_eq!(service.requests().len(), 2);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let file: FixtureFile = serde_json::from_str(r#"{"name": "notes.txt"}"#).unwrap();
        assert_eq!(file.mime_type, "");
        assert!(!file.reject_upload);
        assert!(!file.unreadable);
    }
}
