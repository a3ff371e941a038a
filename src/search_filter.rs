//! Welcome page search filters.
//!
//! The search form has two modes, picked with the `#purchases` and
//! `#sales` radios. Each mode owns a fixed group of checkboxes in its own
//! fieldset; only the selected mode's group is usable, the other one is
//! disabled and its labels greyed out with `labelDisable`.

use serde::Deserialize;

use crate::constants::{classes, ids};
use crate::dom::Renderer;
use crate::error::PageError;

/// Search mode selected by the radios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Searching items the user bid on
    Purchases,
    /// Searching items the user sells
    Sales,
}

/// Fields and fieldset owned by one search mode.
#[derive(Debug, Clone)]
struct FilterGroup<N> {
    fieldset: N,
    fields: Vec<N>,
}

impl<N: Clone> FilterGroup<N> {
    fn bind<R>(page: &R, fieldset_id: &str, field_ids: &[&str]) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        Ok(Self {
            fieldset: page.require_by_id(fieldset_id)?,
            fields: field_ids
                .iter()
                .map(|id| page.require_by_id(id))
                .collect::<Result<_, _>>()?,
        })
    }

    fn set_enabled<R>(&self, page: &R, enabled: bool)
    where
        R: Renderer<Node = N>,
    {
        for field in &self.fields {
            page.set_disabled(field, !enabled);
        }
        for label in page.labels_in(&self.fieldset) {
            page.toggle_class(&label, classes::LABEL_DISABLED, !enabled);
        }
    }
}

/// Enables the filter group of the selected search mode.
#[derive(Debug, Clone)]
pub struct SearchFilterResponder<N> {
    purchases_radio: N,
    sales_radio: N,
    purchases: FilterGroup<N>,
    sales: FilterGroup<N>,
}

impl<N: Clone> SearchFilterResponder<N> {
    /// Resolve both radios, both fieldsets and every filter field.
    pub fn bind<R>(page: &R) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        Ok(Self {
            purchases_radio: page.require_by_id(ids::PURCHASES)?,
            sales_radio: page.require_by_id(ids::SALES)?,
            purchases: FilterGroup::bind(page, ids::PURCHASES_FIELDSET, &ids::PURCHASE_FIELDS)?,
            sales: FilterGroup::bind(page, ids::SALES_FIELDSET, &ids::SALE_FIELDS)?,
        })
    }

    /// The two radios, for binding click listeners.
    pub fn radios(&self) -> [&N; 2] {
        [&self.purchases_radio, &self.sales_radio]
    }

    /// Mode of the checked radio. Anything but purchases means sales.
    pub fn selected_mode<R>(&self, page: &R) -> SearchMode
    where
        R: Renderer<Node = N>,
    {
        if page.is_checked(&self.purchases_radio) {
            SearchMode::Purchases
        } else {
            SearchMode::Sales
        }
    }

    /// Enable the group of `mode` and disable the other one.
    pub fn apply<R>(&self, page: &R, mode: SearchMode)
    where
        R: Renderer<Node = N>,
    {
        let (active, inactive) = match mode {
            SearchMode::Purchases => (&self.purchases, &self.sales),
            SearchMode::Sales => (&self.sales, &self.purchases),
        };
        active.set_enabled(page, true);
        inactive.set_enabled(page, false);
    }

    /// Apply the mode of the checked radio. Run once at startup and on
    /// every radio click.
    pub fn sync<R>(&self, page: &R) -> SearchMode
    where
        R: Renderer<Node = N>,
    {
        let mode = self.selected_mode(page);
        self.apply(page, mode);
        log::debug!("Search mode {mode:?}");
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryPage;

    fn fields_disabled(page: &MemoryPage, field_ids: &[&str]) -> Vec<bool> {
        field_ids
            .iter()
            .map(|id| page.is_disabled(&page.require_by_id(id).unwrap()))
            .collect()
    }

    fn labels_disabled(page: &MemoryPage, fieldset_id: &str) -> Vec<bool> {
        let fieldset = page.require_by_id(fieldset_id).unwrap();
        page.labels_in(&fieldset)
            .iter()
            .map(|label| page.has_class(label, classes::LABEL_DISABLED))
            .collect()
    }

    #[test]
    fn test_purchases_enables_purchase_group_only() {
        let page = MemoryPage::welcome(&[]);
        let filter = SearchFilterResponder::bind(&page).unwrap();

        assert_eq!(filter.sync(&page), SearchMode::Purchases);
        assert_eq!(fields_disabled(&page, &ids::PURCHASE_FIELDS), vec![false; 3]);
        assert_eq!(fields_disabled(&page, &ids::SALE_FIELDS), vec![true; 3]);
        assert_eq!(labels_disabled(&page, ids::PURCHASES_FIELDSET), vec![false; 3]);
        assert_eq!(labels_disabled(&page, ids::SALES_FIELDSET), vec![true; 3]);
    }

    #[test]
    fn test_switching_to_sales_flips_groups() {
        let page = MemoryPage::welcome(&[]);
        let filter = SearchFilterResponder::bind(&page).unwrap();
        filter.sync(&page);

        page.select_radio(page.require_by_id(ids::SALES).unwrap());
        assert_eq!(filter.sync(&page), SearchMode::Sales);
        assert_eq!(fields_disabled(&page, &ids::PURCHASE_FIELDS), vec![true; 3]);
        assert_eq!(fields_disabled(&page, &ids::SALE_FIELDS), vec![false; 3]);
        assert_eq!(labels_disabled(&page, ids::PURCHASES_FIELDSET), vec![true; 3]);
        assert_eq!(labels_disabled(&page, ids::SALES_FIELDSET), vec![false; 3]);
    }

    #[test]
    fn test_groups_always_complementary() {
        let page = MemoryPage::welcome(&[]);
        let filter = SearchFilterResponder::bind(&page).unwrap();

        for mode in [
            SearchMode::Sales,
            SearchMode::Purchases,
            SearchMode::Purchases,
            SearchMode::Sales,
        ] {
            filter.apply(&page, mode);
            let purchases = fields_disabled(&page, &ids::PURCHASE_FIELDS);
            let sales = fields_disabled(&page, &ids::SALE_FIELDS);
            for (p, s) in purchases.iter().zip(&sales) {
                assert_ne!(p, s);
            }
        }
    }

    #[test]
    fn test_nothing_checked_means_sales() {
        let page = MemoryPage::welcome(&[]);
        let purchases = page.require_by_id(ids::PURCHASES).unwrap();
        // Uncheck everything by checking an unrelated radio of the same group
        let other = page.add_element(page.root(), "input", None, &[]);
        page.set_attribute(&other, "name", "mode");
        page.select_radio(other);
        assert!(!page.is_checked(&purchases));

        let filter = SearchFilterResponder::bind(&page).unwrap();
        assert_eq!(filter.selected_mode(&page), SearchMode::Sales);
    }

    #[test]
    fn test_missing_field_fails_bind() {
        let page = MemoryPage::welcome(&[]);
        let won = page.require_by_id("wonBids").unwrap();
        page.detach(&won);

        assert!(matches!(
            SearchFilterResponder::bind(&page),
            Err(PageError::MissingElement { ref id }) if id == "wonBids"
        ));
    }
}
