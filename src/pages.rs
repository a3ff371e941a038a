//! Controller sets of the three pages.
//!
//! Each page value is built once from its configuration, binds every
//! element it needs up front (so a broken template fails at startup, not
//! inside an event handler) and exposes one method per browser event.
//! Event wiring lives in the `wasm` module and in the preview runner.

use std::str::FromStr;

use serde::Deserialize;

use crate::carousel::{CarouselAnimator, CarouselState};
use crate::config::PageConfig;
use crate::dom::Renderer;
use crate::error::PageError;
use crate::layout::{LayoutMode, LayoutResponder};
use crate::loader::ImageLoader;
use crate::search_filter::{SearchFilterResponder, SearchMode};
use crate::service::{ImageService, LocalFile};
use crate::uploader::{ImageUploader, UploadOutcome, UploadTask};

/// The pages carrying controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Bid on an item
    ItemBid,
    /// Create or edit an item for sale
    ItemSell,
    /// Search page with item cards
    Welcome,
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item_bid" => Ok(Self::ItemBid),
            "item_sell" => Ok(Self::ItemSell),
            "welcome" => Ok(Self::Welcome),
            other => Err(format!("Unknown page '{other}'")),
        }
    }
}

/// Item bid page: read-only pictures pane next to the item details.
#[derive(Debug)]
pub struct ItemBidPage<N> {
    layout: LayoutResponder<N>,
    loader: ImageLoader<N>,
}

impl<N: Clone> ItemBidPage<N> {
    /// Bind the page and size the pictures pane once.
    pub fn initialize<R>(page: &R, config: &PageConfig) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        let this = Self {
            layout: LayoutResponder::bind(page, config.layout)?,
            loader: ImageLoader::bind(page)?,
        };
        this.layout.refresh(page);
        Ok(this)
    }

    /// Viewport resized.
    pub fn on_resize<R>(&self, page: &R) -> Option<LayoutMode>
    where
        R: Renderer<Node = N>,
    {
        self.layout.refresh(page)
    }

    /// Window loaded: list the item images. Failures are logged and dropped.
    pub async fn on_load<R, S>(&self, page: &R, service: &S) -> usize
    where
        R: Renderer<Node = N>,
        S: ImageService,
    {
        load_pictures(&self.loader, page, service).await
    }
}

/// Item sell page: the bid page plus picture upload.
#[derive(Debug)]
pub struct ItemSellPage<N> {
    layout: LayoutResponder<N>,
    loader: ImageLoader<N>,
    uploader: ImageUploader<N>,
}

impl<N: Clone> ItemSellPage<N> {
    /// Bind the page and size the pictures pane once.
    pub fn initialize<R>(page: &R, config: &PageConfig) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        let this = Self {
            layout: LayoutResponder::bind(page, config.layout)?,
            loader: ImageLoader::bind(page)?,
            uploader: ImageUploader::bind(page)?,
        };
        this.layout.refresh(page);
        Ok(this)
    }

    /// The upload controller, for binding the picker listeners.
    pub fn uploader(&self) -> &ImageUploader<N> {
        &self.uploader
    }

    /// Viewport resized.
    pub fn on_resize<R>(&self, page: &R) -> Option<LayoutMode>
    where
        R: Renderer<Node = N>,
    {
        self.layout.refresh(page)
    }

    /// Window loaded: list the item and session images.
    pub async fn on_load<R, S>(&self, page: &R, service: &S) -> usize
    where
        R: Renderer<Node = N>,
        S: ImageService,
    {
        load_pictures(&self.loader, page, service).await
    }

    /// "Add picture" clicked.
    pub fn on_add_picture_click<R>(&self, page: &R)
    where
        R: Renderer<Node = N>,
    {
        self.uploader.open_picker(page);
    }

    /// Files picked: insert placeholders, return one task per image file.
    /// Each task is then driven with [`ItemSellPage::on_upload`].
    pub fn on_files_selected<R, F>(&self, page: &R, files: Vec<F>) -> Vec<UploadTask<N, F>>
    where
        R: Renderer<Node = N>,
        F: LocalFile,
    {
        self.uploader.accept_files(page, files)
    }

    /// Upload one picked file and resolve its placeholder.
    pub async fn on_upload<R, S>(
        &self,
        page: &R,
        service: &S,
        task: UploadTask<N, S::File>,
    ) -> UploadOutcome
    where
        R: Renderer<Node = N>,
        S: ImageService,
    {
        self.uploader.upload(page, service, task).await
    }
}

/// Welcome page: search filters and item cards.
///
/// The search filters are only rendered for signed-in users, so the page
/// works without them; the item cards are always required.
#[derive(Debug)]
pub struct WelcomePage<N> {
    filter: Option<SearchFilterResponder<N>>,
    carousel: CarouselAnimator<N>,
}

impl<N: Clone + PartialEq> WelcomePage<N> {
    /// Bind the page and apply the initial search mode.
    ///
    /// Incomplete filter markup disables the filter only; the carousel is
    /// bound regardless.
    pub fn initialize<R>(page: &R, _config: &PageConfig) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        let filter = match SearchFilterResponder::bind(page) {
            Ok(filter) => {
                filter.sync(page);
                Some(filter)
            }
            Err(e) => {
                log::error!("Search filters disabled: {e}");
                None
            }
        };

        Ok(Self {
            filter,
            carousel: CarouselAnimator::bind(page)?,
        })
    }

    /// The search filter controller, for binding the radio listeners.
    /// `None` when the page has no complete filter form.
    pub fn filter(&self) -> Option<&SearchFilterResponder<N>> {
        self.filter.as_ref()
    }

    /// The carousel controller, for binding per-card listeners.
    pub fn carousel(&self) -> &CarouselAnimator<N> {
        &self.carousel
    }

    /// One of the search mode radios clicked.
    pub fn on_radio_click<R>(&self, page: &R) -> Option<SearchMode>
    where
        R: Renderer<Node = N>,
    {
        self.filter.as_ref().map(|filter| filter.sync(page))
    }

    /// Window loaded: fill every item card, one request each.
    ///
    /// Cards are awaited in turn here; the browser wiring spawns one task
    /// per card with [`CarouselAnimator::load_card`] instead.
    pub async fn on_load<R, S>(&self, page: &R, service: &S) -> Vec<CarouselState>
    where
        R: Renderer<Node = N>,
        S: ImageService,
    {
        let mut states = Vec::with_capacity(self.carousel.cards().len());
        for index in 0..self.carousel.cards().len() {
            states.push(self.carousel.load_card(page, service, index).await);
        }
        states
    }

    /// Front image animation finished.
    pub fn on_animation_end<R>(&self, page: &R, image: &N) -> Option<N>
    where
        R: Renderer<Node = N>,
    {
        self.carousel.rotate(page, image)
    }
}

async fn load_pictures<N, R, S>(loader: &ImageLoader<N>, page: &R, service: &S) -> usize
where
    N: Clone,
    R: Renderer<Node = N>,
    S: ImageService,
{
    match loader.load(page, service).await {
        Ok(count) => {
            log::info!("Loaded {count} item images");
            count
        }
        Err(e) => {
            log::warn!("Item images unavailable: {e}");
            0
        }
    }
}
