//! DOM access for the page controllers.
//!
//! Controllers never touch the browser directly: every read and mutation
//! goes through [`Renderer`], implemented by [`WebPage`](web::WebPage) in the
//! browser and by [`MemoryPage`](memory::MemoryPage) for tests and the
//! headless preview.
//!
//! All methods take `&self`. Implementations keep their mutable state behind
//! interior mutability and only borrow it for the duration of one call, so a
//! renderer can be shared between concurrently running tasks.

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt::Debug;

use crate::error::PageError;

/// Minimal DOM interface used by the controllers.
pub trait Renderer {
    /// Handle to one element.
    type Node: Clone + PartialEq + Debug;

    /// Element with the given id attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All elements carrying a class, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` carrying a class.
    fn descendant_by_class(&self, scope: &Self::Node, class: &str) -> Option<Self::Node>;

    /// All `<label>` descendants of `scope`, in document order.
    fn labels_in(&self, scope: &Self::Node) -> Vec<Self::Node>;

    /// First element child.
    fn first_child(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Element children, in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Parent element, `None` when detached.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Element sibling immediately before `node`.
    fn previous_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Attribute value.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set an attribute value.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// Rendered content-box width in CSS pixels, whatever the element's
    /// `box-sizing` (padding, border and scrollbar excluded).
    fn width(&self, node: &Self::Node) -> f64;

    /// Rendered content-box height in CSS pixels.
    fn height(&self, node: &Self::Node) -> f64;

    /// Set the inline height in CSS pixels.
    fn set_height(&self, node: &Self::Node, height: f64);

    /// Create a detached `<img>` element with one class and an optional source.
    fn create_image(&self, class: &str, src: Option<&str>) -> Self::Node;

    /// Insert `child` as last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Insert `child` as first child of `parent`.
    fn prepend_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Detach `node` from its parent. The handle stays usable.
    fn detach(&self, node: &Self::Node);

    /// Whether `node` carries a class.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Add (`enabled`) or remove a class.
    fn toggle_class(&self, node: &Self::Node, class: &str, enabled: bool);

    /// Set the `disabled` property of a form control.
    fn set_disabled(&self, node: &Self::Node, disabled: bool);

    /// Whether a form control is disabled.
    fn is_disabled(&self, node: &Self::Node) -> bool;

    /// Whether a checkbox or radio is checked.
    fn is_checked(&self, node: &Self::Node) -> bool;

    /// Dispatch a click on `node`.
    fn click(&self, node: &Self::Node);

    /// Element with the given id, or a missing element error.
    fn require_by_id(&self, id: &str) -> Result<Self::Node, PageError> {
        self.element_by_id(id)
            .ok_or_else(|| PageError::missing_element(id))
    }
}

/// Content-box length from a client length (content plus padding) and the
/// two paddings along the same axis.
#[cfg(any(target_arch = "wasm32", test))]
pub(crate) fn content_size(client: f64, padding_start: f64, padding_end: f64) -> f64 {
    (client - padding_start - padding_end).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_size_excludes_padding() {
        // border-box pane declared 200px wide: 2px borders, 8px padding
        let client = 200.0 - 2.0 * 2.0;
        assert_eq!(content_size(client, 8.0, 8.0), 180.0);
        assert_eq!(content_size(200.0, 0.0, 0.0), 200.0);
    }

    #[test]
    fn test_content_size_of_collapsed_element() {
        assert_eq!(content_size(0.0, 4.0, 4.0), 0.0);
    }
}
