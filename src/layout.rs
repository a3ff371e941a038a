//! Pictures pane sizing on the item forms.
//!
//! The pictures pane sits left of the details pane on wide screens and
//! above it on small ones. In the column layout its height must follow the
//! details pane; in the stacked layout it gets a fixed height. Either way
//! the height must be explicit for its overflow scrolling to work.

use crate::config::LayoutConfig;
use crate::constants::ids;
use crate::dom::Renderer;
use crate::error::PageError;

/// The two layouts selected by the CSS breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Pictures pane left of the details pane, as tall as it
    Column,
    /// Pictures pane above the details pane, fixed height
    Stacked,
}

/// Keeps the pictures pane height in sync with the current layout.
#[derive(Debug, Clone)]
pub struct LayoutResponder<N> {
    left: N,
    right: N,
    config: LayoutConfig,
}

impl<N: Clone> LayoutResponder<N> {
    /// Resolve both panes.
    pub fn bind<R>(page: &R, config: LayoutConfig) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        Ok(Self {
            left: page.require_by_id(ids::LEFT_PART)?,
            right: page.require_by_id(ids::RIGHT_PART)?,
            config,
        })
    }

    /// Recompute the pictures pane height. Run on load and on every resize.
    ///
    /// Returns the layout applied, `None` when the pane width matches
    /// neither breakpoint (nothing is changed then).
    pub fn refresh<R>(&self, page: &R) -> Option<LayoutMode>
    where
        R: Renderer<Node = N>,
    {
        let mode = self.config.mode_for_width(page.width(&self.left))?;
        let height = match mode {
            LayoutMode::Column => page.height(&self.right),
            LayoutMode::Stacked => self.config.stacked_height,
        };
        page.set_height(&self.left, height);
        log::debug!("Pictures pane layout {mode:?}, height {height}px");
        Some(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryPage;

    fn panes(page: &MemoryPage) -> (crate::dom::memory::NodeId, crate::dom::memory::NodeId) {
        (
            page.require_by_id(ids::LEFT_PART).unwrap(),
            page.require_by_id(ids::RIGHT_PART).unwrap(),
        )
    }

    #[test]
    fn test_column_follows_details_height() {
        let page = MemoryPage::item_form(false);
        let (left, right) = panes(&page);
        page.set_size(right, 600.0, 512.0);

        let layout = LayoutResponder::bind(&page, LayoutConfig::default()).unwrap();
        assert_eq!(layout.refresh(&page), Some(LayoutMode::Column));
        assert_eq!(page.height(&left), 512.0);

        // Details grew (e.g. after a reflow): the next resize follows
        page.set_size(right, 600.0, 700.0);
        layout.refresh(&page);
        assert_eq!(page.height(&left), 700.0);
    }

    #[test]
    fn test_stacked_uses_fixed_height() {
        let page = MemoryPage::item_form(false);
        let (left, _) = panes(&page);
        page.set_width(left, 400.0);

        let layout = LayoutResponder::bind(&page, LayoutConfig::default()).unwrap();
        assert_eq!(layout.refresh(&page), Some(LayoutMode::Stacked));
        assert_eq!(page.height(&left), 128.0);
        assert_eq!(
            page.attribute(&left, "style").as_deref(),
            Some("height: 128px;")
        );
    }

    #[test]
    fn test_other_widths_leave_height_alone() {
        let page = MemoryPage::item_form(false);
        let (left, _) = panes(&page);
        page.set_size(left, 320.0, 50.0);

        let layout = LayoutResponder::bind(&page, LayoutConfig::default()).unwrap();
        assert_eq!(layout.refresh(&page), None);
        assert_eq!(page.height(&left), 50.0);
        assert_eq!(page.attribute(&left, "style"), None);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let page = MemoryPage::item_form(false);
        let (left, _) = panes(&page);
        let layout = LayoutResponder::bind(&page, LayoutConfig::default()).unwrap();

        layout.refresh(&page);
        let first = page.height(&left);
        layout.refresh(&page);
        assert_eq!(page.height(&left), first);
    }

    #[test]
    fn test_missing_pane_fails_bind() {
        let page = MemoryPage::new();
        let result = LayoutResponder::bind(&page, LayoutConfig::default());
        assert!(matches!(
            result,
            Err(PageError::MissingElement { ref id }) if id == ids::LEFT_PART
        ));
    }
}
