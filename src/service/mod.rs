//! Image handler endpoint access.
//!
//! The image handler accepts uploads (`POST`, multipart field `file`) and
//! lists image URLs as a JSON array of strings (`GET`, optionally with
//! `?identifier=<item>`). [`ImageService`] abstracts both calls so the
//! controllers run unchanged against the browser and against fixtures.

pub mod fixture;

#[cfg(target_arch = "wasm32")]
pub mod http;

use std::future::Future;

use crate::constants::{IDENTIFIER_PARAM, IMAGE_MIME_PREFIX};
use crate::error::PageError;

/// A file picked by the user.
pub trait LocalFile {
    /// File name as reported by the browser.
    fn name(&self) -> String;

    /// Declared MIME type, empty when unknown.
    fn mime_type(&self) -> String;

    /// Read the file contents as a `data:` URL.
    fn read_data_url(&self) -> impl Future<Output = Result<String, PageError>>;
}

/// Client of the image handler endpoint.
pub trait ImageService {
    /// File type accepted by [`ImageService::upload`].
    type File: LocalFile;

    /// Fetch the image URLs of the current form, or of one item.
    fn list_images(
        &self,
        identifier: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, PageError>>;

    /// Upload one file. Any 2xx answer is a success.
    fn upload(&self, file: &Self::File) -> impl Future<Output = Result<(), PageError>>;
}

/// Whether a declared MIME type is accepted for upload.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with(IMAGE_MIME_PREFIX)
}

/// Listing URL for the handler path and an optional item identifier.
///
/// The identifier is percent-encoded; the handler path is used as given.
pub fn listing_url(handler_path: &str, identifier: Option<&str>) -> String {
    match identifier {
        Some(identifier) => {
            let separator = if handler_path.contains('?') { '&' } else { '?' };
            let identifier = urlencoding::encode(identifier);
            format!("{handler_path}{separator}{IDENTIFIER_PARAM}={identifier}")
        }
        None => handler_path.to_string(),
    }
}

/// Decode a listing response body.
pub fn parse_listing(body: &str) -> Result<Vec<String>, PageError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/svg+xml"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("text/image/png"));
        assert!(!is_image_mime(""));
        // MIME types are lowercase as reported by browsers
        assert!(!is_image_mime("IMAGE/PNG"));
    }

    #[test]
    fn test_listing_url() {
        assert_eq!(listing_url("image_handler", None), "image_handler");
        assert_eq!(
            listing_url("image_handler", Some("42")),
            "image_handler?identifier=42"
        );
        assert_eq!(
            listing_url("image_handler?lang=fr", Some("42")),
            "image_handler?lang=fr&identifier=42"
        );
    }

    #[test]
    fn test_listing_url_encodes_identifier() {
        assert_eq!(
            listing_url("image_handler", Some("a b&c#1")),
            "image_handler?identifier=a%20b%26c%231"
        );
        assert_eq!(
            listing_url("image_handler", Some("item-4.2_x~")),
            "image_handler?identifier=item-4.2_x~"
        );
    }

    #[test]
    fn test_parse_listing() {
        assert_eq!(
            parse_listing(r#"["/img/1.png", "img/2.png"]"#).unwrap(),
            vec!["/img/1.png".to_string(), "img/2.png".to_string()]
        );
        assert!(parse_listing("[]").unwrap().is_empty());
        assert!(parse_listing(r#"{"images": []}"#).is_err());
        assert!(parse_listing("[1, 2]").is_err());
    }
}
