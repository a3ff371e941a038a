//! Item card image carousel on the welcome page.
//!
//! Every item card lists its images from the image handler and stacks them
//! in its image container. The last child is on top; when there is more
//! than one image it carries `itemCardImageFront`, whose CSS animation
//! fades it out. On `animationend` the front image is moved to the bottom
//! of the stack (first child) and the image just below it becomes the new
//! front, which starts the next animation. The cycle never stops.

use crate::constants::{ITEM_ID_PREFIX_LEN, classes};
use crate::dom::Renderer;
use crate::error::PageError;
use crate::service::ImageService;

/// Animation state of one item card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    /// No image (none listed, or the listing failed)
    Empty,
    /// One image, no animation
    Single,
    /// Several images rotating
    Rotating,
}

impl CarouselState {
    fn for_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            1 => Self::Single,
            _ => Self::Rotating,
        }
    }
}

/// One item card on the page.
#[derive(Debug, Clone)]
pub struct ItemCard<N> {
    /// Item identifier sent to the image handler
    pub identifier: String,
    /// Container stacking the card images
    pub images: N,
}

/// Item identifier carried by a card element id, `None` when nothing
/// follows the prefix.
pub fn identifier_from_element_id(element_id: &str) -> Option<&str> {
    let start = element_id
        .char_indices()
        .nth(ITEM_ID_PREFIX_LEN)
        .map(|(index, _)| index)?;
    Some(&element_id[start..])
}

/// Drives the image stacks of every item card.
#[derive(Debug, Clone)]
pub struct CarouselAnimator<N> {
    cards: Vec<ItemCard<N>>,
}

impl<N: Clone + PartialEq> CarouselAnimator<N> {
    /// Discover every item card.
    ///
    /// A card whose first child has no identifier in its id, or which has
    /// no image container, fails the whole bind.
    pub fn bind<R>(page: &R) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        let cards = page
            .elements_by_class(classes::ITEM_CARD)
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let identifier = page
                    .first_child(card)
                    .and_then(|child| page.attribute(&child, "id"))
                    .and_then(|id| identifier_from_element_id(&id).map(str::to_string))
                    .ok_or(PageError::MissingItemIdentifier { index })?;
                let images = page
                    .descendant_by_class(card, classes::ITEM_CARD_IMAGES)
                    .ok_or_else(|| PageError::MissingCardElement {
                        index,
                        class: classes::ITEM_CARD_IMAGES.to_string(),
                    })?;
                Ok(ItemCard { identifier, images })
            })
            .collect::<Result<Vec<_>, PageError>>()?;

        log::debug!("Found {} item cards", cards.len());
        Ok(Self { cards })
    }

    /// Cards in document order.
    pub fn cards(&self) -> &[ItemCard<N>] {
        &self.cards
    }

    /// Request one card's images and stack them.
    ///
    /// A failed listing leaves the card empty.
    pub async fn load_card<R, S>(&self, page: &R, service: &S, index: usize) -> CarouselState
    where
        R: Renderer<Node = N>,
        S: ImageService,
    {
        let Some(card) = self.cards.get(index) else {
            return CarouselState::Empty;
        };

        match service.list_images(Some(&card.identifier)).await {
            Ok(urls) => self.populate(page, index, &urls),
            Err(e) => {
                log::warn!("No images for item {}: {e}", card.identifier);
                CarouselState::Empty
            }
        }
    }

    /// Stack `urls` in card `index`, in order. With several images the last
    /// one becomes the front image.
    pub fn populate<R>(&self, page: &R, index: usize, urls: &[String]) -> CarouselState
    where
        R: Renderer<Node = N>,
    {
        let Some(card) = self.cards.get(index) else {
            return CarouselState::Empty;
        };

        let mut last = None;
        for url in urls {
            let image = page.create_image(classes::ITEM_CARD_IMAGE, Some(url));
            page.append_child(&card.images, &image);
            last = Some(image);
        }

        let state = CarouselState::for_count(urls.len());
        if let (CarouselState::Rotating, Some(front)) = (state, last) {
            page.toggle_class(&front, classes::ITEM_CARD_IMAGE_FRONT, true);
        }
        state
    }

    /// `animationend` handler: send the finished front image to the bottom
    /// and promote the image below it. Returns the new front image.
    ///
    /// Ignored (returns `None`) for images that are not the front image of
    /// a card with several images.
    pub fn rotate<R>(&self, page: &R, image: &N) -> Option<N>
    where
        R: Renderer<Node = N>,
    {
        if !page.has_class(image, classes::ITEM_CARD_IMAGE_FRONT) {
            return None;
        }
        let parent = page.parent(image)?;
        let next = page.previous_sibling(image)?;

        page.detach(image);
        page.toggle_class(image, classes::ITEM_CARD_IMAGE_FRONT, false);
        page.prepend_child(&parent, image);
        page.toggle_class(&next, classes::ITEM_CARD_IMAGE_FRONT, true);
        log::debug!("Carousel rotated");
        Some(next)
    }

    /// Card whose image container holds `image`.
    pub fn card_of<R>(&self, page: &R, image: &N) -> Option<&ItemCard<N>>
    where
        R: Renderer<Node = N>,
    {
        let parent = page.parent(image)?;
        self.cards.iter().find(|card| card.images == parent)
    }

    /// Images of card `index`, topmost first.
    ///
    /// In this order a rotation moves the first image to the end and the
    /// second one becomes front: `[a, b, c]` becomes `[b, c, a]`.
    pub fn stack_order<R>(&self, page: &R, index: usize) -> Vec<N>
    where
        R: Renderer<Node = N>,
    {
        self.cards
            .get(index)
            .map(|card| page.children(&card.images).into_iter().rev().collect())
            .unwrap_or_default()
    }

    /// Current front image of card `index`.
    pub fn front_image<R>(&self, page: &R, index: usize) -> Option<N>
    where
        R: Renderer<Node = N>,
    {
        let card = self.cards.get(index)?;
        page.children(&card.images)
            .into_iter()
            .find(|image| page.has_class(image, classes::ITEM_CARD_IMAGE_FRONT))
    }
}
