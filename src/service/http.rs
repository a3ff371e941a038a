//! Image handler over HTTP (WASM only).

use gloo::net::http::Request;
use web_sys::FormData;

use super::{ImageService, LocalFile, listing_url};
use crate::constants::UPLOAD_FIELD;
use crate::error::PageError;

/// File from an `<input type="file">` selection.
#[derive(Debug, Clone)]
pub struct BrowserFile(pub web_sys::File);

impl LocalFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    async fn read_data_url(&self) -> Result<String, PageError> {
        let file = gloo::file::File::from(self.0.clone());
        gloo::file::futures::read_as_data_url(&file)
            .await
            .map_err(|e| PageError::file_read(self.0.name(), e.to_string()))
    }
}

/// Image handler reached with `fetch`.
#[derive(Debug, Clone)]
pub struct HttpImageService {
    handler_path: String,
}

impl HttpImageService {
    /// Client for the handler at `handler_path`.
    pub fn new(handler_path: impl Into<String>) -> Self {
        Self {
            handler_path: handler_path.into(),
        }
    }
}

impl ImageService for HttpImageService {
    type File = BrowserFile;

    async fn list_images(&self, identifier: Option<&str>) -> Result<Vec<String>, PageError> {
        let url = listing_url(&self.handler_path, identifier);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| PageError::request(&url, e.to_string()))?;

        if !response.ok() {
            return Err(PageError::status(url, response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PageError::request(&url, e.to_string()))?;
        super::parse_listing(&body)
    }

    async fn upload(&self, file: &BrowserFile) -> Result<(), PageError> {
        let url = &self.handler_path;
        let form = FormData::new().map_err(|e| PageError::request(url, format!("{e:?}")))?;
        form.append_with_blob(UPLOAD_FIELD, &file.0)
            .map_err(|e| PageError::request(url, format!("{e:?}")))?;

        // The browser sets the multipart boundary itself
        let response = Request::post(url)
            .body(form)
            .map_err(|e| PageError::request(url, e.to_string()))?
            .send()
            .await
            .map_err(|e| PageError::request(url, e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(PageError::status(url, response.status()))
        }
    }
}
