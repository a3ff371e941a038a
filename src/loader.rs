//! Item form image listing.
//!
//! On load, the item forms show the images already attached to the item
//! and the ones uploaded earlier in the session. The image handler lists
//! them; one `img.picture` is appended per URL.

use std::cell::Cell;

use crate::constants::{classes, ids};
use crate::dom::Renderer;
use crate::error::PageError;
use crate::service::ImageService;

/// Fills `#picturesDiv` from the image handler listing, once per page.
#[derive(Debug)]
pub struct ImageLoader<N> {
    container: N,
    started: Cell<bool>,
}

impl<N: Clone> ImageLoader<N> {
    /// Resolve the pictures container.
    pub fn bind<R>(page: &R) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        Ok(Self {
            container: page.require_by_id(ids::PICTURES_DIV)?,
            started: Cell::new(false),
        })
    }

    /// Request the listing and append its images.
    ///
    /// Only the first call issues a request; later calls return `Ok(0)`.
    /// Returns the number of images appended.
    pub async fn load<R, S>(&self, page: &R, service: &S) -> Result<usize, PageError>
    where
        R: Renderer<Node = N>,
        S: ImageService,
    {
        if self.started.replace(true) {
            log::warn!("Image listing already requested for this page");
            return Ok(0);
        }

        let urls = service.list_images(None).await?;
        Ok(self.append_listing(page, &urls).len())
    }

    /// Append one `img.picture` per URL, in order.
    pub fn append_listing<R>(&self, page: &R, urls: &[String]) -> Vec<N>
    where
        R: Renderer<Node = N>,
    {
        urls.iter()
            .map(|url| {
                let image = page.create_image(classes::PICTURE, Some(url));
                page.append_child(&self.container, &image);
                image
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryPage;
    use crate::service::fixture::FixtureService;

    #[test]
    fn test_appends_in_response_order() {
        let page = MemoryPage::item_form(false);
        let service = FixtureService::new("image_handler").with_listing(
            None,
            &["/img/3.png", "/img/1.png", "/img/2.png"],
        );
        let loader = ImageLoader::bind(&page).unwrap();

        let count = pollster::block_on(loader.load(&page, &service)).unwrap();
        assert_eq!(count, 3);

        let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
        assert_eq!(
            page.child_sources(pictures),
            vec![
                Some("/img/3.png".to_string()),
                Some("/img/1.png".to_string()),
                Some("/img/2.png".to_string()),
            ]
        );
        assert!(
            page.children(&pictures)
                .iter()
                .all(|image| page.has_class(image, classes::PICTURE))
        );
        assert_eq!(service.requests(), vec!["GET image_handler"]);
    }

    #[test]
    fn test_empty_listing() {
        let page = MemoryPage::item_form(false);
        let service = FixtureService::new("image_handler").with_listing(None, &[]);
        let loader = ImageLoader::bind(&page).unwrap();

        assert_eq!(pollster::block_on(loader.load(&page, &service)).unwrap(), 0);
        let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
        assert!(page.children(&pictures).is_empty());
    }

    #[test]
    fn test_second_load_does_not_duplicate() {
        let page = MemoryPage::item_form(false);
        let service = FixtureService::new("image_handler").with_listing(None, &["/a.png"]);
        let loader = ImageLoader::bind(&page).unwrap();

        pollster::block_on(loader.load(&page, &service)).unwrap();
        assert_eq!(pollster::block_on(loader.load(&page, &service)).unwrap(), 0);

        let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
        assert_eq!(page.children(&pictures).len(), 1);
        assert_eq!(service.requests().len(), 1);
    }

    #[test]
    fn test_failed_listing_appends_nothing() {
        let page = MemoryPage::item_form(false);
        let service = FixtureService::new("image_handler").with_failing_listing(None);
        let loader = ImageLoader::bind(&page).unwrap();

        assert!(pollster::block_on(loader.load(&page, &service)).is_err());
        let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
        assert!(page.children(&pictures).is_empty());
    }

    #[test]
    fn test_missing_container_fails_bind() {
        let page = MemoryPage::new();
        assert!(ImageLoader::bind(&page).is_err());
    }
}
