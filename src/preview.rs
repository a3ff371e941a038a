//! Headless page preview.
//!
//! Replays a page lifecycle (initialize, load, user actions, resize,
//! animation steps) against the in-memory DOM and a canned image handler.
//! Used by the `omf-preview` binary and by the scenario tests.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::config::{ConfigError, PageConfig};
use crate::constants::ids;
use crate::dom::Renderer;
use crate::dom::memory::MemoryPage;
use crate::error::PageError;
use crate::pages::{ItemBidPage, ItemSellPage, PageKind, WelcomePage};
use crate::search_filter::SearchMode;
use crate::service::fixture::{FixtureFile, FixtureService};

/// Rendered pane sizes of the item forms.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PaneSizes {
    /// Width of `#leftPart`
    pub pictures_width: f64,
    /// Height of `#rightPart`
    pub details_height: f64,
}

impl Default for PaneSizes {
    fn default() -> Self {
        Self {
            pictures_width: 200.0,
            details_height: 480.0,
        }
    }
}

/// One page lifecycle to replay.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Page to build
    pub page: PageKind,
    /// Page configuration
    #[serde(default)]
    pub config: PageConfig,
    /// Initial pane sizes (item forms)
    #[serde(default)]
    pub panes: PaneSizes,
    /// Pictures pane width after a resize (item forms)
    #[serde(default)]
    pub resize_to: Option<f64>,
    /// Item card identifiers (welcome page)
    #[serde(default)]
    pub items: Vec<String>,
    /// Listing answers by identifier, `""` for the item form listing
    #[serde(default)]
    pub listings: HashMap<String, Vec<String>>,
    /// Identifiers whose listing fails, `""` for the item form listing
    #[serde(default)]
    pub failing_listings: Vec<String>,
    /// Files picked by the user (item sell page)
    #[serde(default)]
    pub files: Vec<FixtureFile>,
    /// Radio checked when the page opens (welcome page)
    #[serde(default)]
    pub mode: Option<SearchMode>,
    /// Animation rounds to play on every card (welcome page)
    #[serde(default)]
    pub animation_steps: usize,
}

impl Scenario {
    /// Parse a scenario and check its configuration.
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let scenario: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Read a scenario file.
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PageError::file_read(path.display().to_string(), e.to_string()))?;
        Self::from_json(&json)
    }

    fn service(&self) -> FixtureService {
        let mut service = FixtureService::new(&self.config.image_handler_path);
        for (identifier, urls) in &self.listings {
            service.set_listing(non_empty(identifier), urls.clone());
        }
        for identifier in &self.failing_listings {
            service.set_failing(non_empty(identifier));
        }
        service
    }
}

fn non_empty(identifier: &str) -> Option<&str> {
    (!identifier.is_empty()).then_some(identifier)
}

/// Result of a replayed scenario.
#[derive(Debug)]
pub struct Preview {
    /// Final page state
    pub page: MemoryPage,
    /// Requests received by the image handler, in order
    pub requests: Vec<String>,
}

/// Replay `scenario` and return the final page.
pub fn run(scenario: &Scenario) -> Result<Preview, PageError> {
    let service = scenario.service();
    let page = match scenario.page {
        PageKind::ItemBid => run_item_bid(scenario, &service)?,
        PageKind::ItemSell => run_item_sell(scenario, &service)?,
        PageKind::Welcome => run_welcome(scenario, &service)?,
    };

    Ok(Preview {
        page,
        requests: service.requests(),
    })
}

fn item_form(scenario: &Scenario, with_uploader: bool) -> Result<MemoryPage, PageError> {
    let page = MemoryPage::item_form(with_uploader);
    let left = page.require_by_id(ids::LEFT_PART)?;
    let right = page.require_by_id(ids::RIGHT_PART)?;
    page.set_width(left, scenario.panes.pictures_width);
    page.set_size(right, page.width(&right), scenario.panes.details_height);
    Ok(page)
}

fn resize(scenario: &Scenario, page: &MemoryPage) -> Result<bool, PageError> {
    let Some(width) = scenario.resize_to else {
        return Ok(false);
    };
    page.set_width(page.require_by_id(ids::LEFT_PART)?, width);
    Ok(true)
}

fn run_item_bid(scenario: &Scenario, service: &FixtureService) -> Result<MemoryPage, PageError> {
    let page = item_form(scenario, false)?;
    let controller = ItemBidPage::initialize(&page, &scenario.config)?;

    pollster::block_on(controller.on_load(&page, service));
    if resize(scenario, &page)? {
        controller.on_resize(&page);
    }
    Ok(page)
}

fn run_item_sell(scenario: &Scenario, service: &FixtureService) -> Result<MemoryPage, PageError> {
    let page = item_form(scenario, true)?;
    let controller = ItemSellPage::initialize(&page, &scenario.config)?;

    pollster::block_on(controller.on_load(&page, service));

    if !scenario.files.is_empty() {
        controller.on_add_picture_click(&page);
        let tasks = controller.on_files_selected(&page, scenario.files.clone());
        for task in tasks {
            let outcome = pollster::block_on(controller.on_upload(&page, service, task));
            log::debug!("Upload finished: {outcome:?}");
        }
    }

    if resize(scenario, &page)? {
        controller.on_resize(&page);
    }
    Ok(page)
}

fn run_welcome(scenario: &Scenario, service: &FixtureService) -> Result<MemoryPage, PageError> {
    let items: Vec<&str> = scenario.items.iter().map(String::as_str).collect();
    let page = MemoryPage::welcome(&items);
    if scenario.mode == Some(SearchMode::Sales) {
        page.select_radio(page.require_by_id(ids::SALES)?);
    }

    let controller = WelcomePage::initialize(&page, &scenario.config)?;
    let states = pollster::block_on(controller.on_load(&page, service));
    log::debug!("Item cards: {states:?}");

    for _ in 0..scenario.animation_steps {
        for index in 0..controller.carousel().cards().len() {
            if let Some(front) = controller.carousel().front_image(&page, index) {
                controller.on_animation_end(&page, &front);
            }
        }
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_scenario() {
        let scenario = Scenario::from_json(r#"{"page": "item_bid"}"#).unwrap();
        assert_eq!(scenario.page, PageKind::ItemBid);
        assert_eq!(scenario.panes.pictures_width, 200.0);
        assert!(scenario.files.is_empty());

        let preview = run(&scenario).unwrap();
        assert_eq!(preview.requests, vec!["GET image_handler"]);
    }

    #[test]
    fn test_scenario_rejects_bad_config() {
        let result = Scenario::from_json(r#"{"page": "welcome", "config": {"version": 7}}"#);
        assert!(matches!(result, Err(PageError::Config(_))));
    }

    #[test]
    fn test_unknown_page_kind() {
        assert!(Scenario::from_json(r#"{"page": "checkout"}"#).is_err());
    }
}
