//! Browser DOM through web-sys.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCollection, HtmlElement, HtmlInputElement, Window};

use super::{Renderer, content_size};
use crate::error::PageError;

/// The live document of the current window.
#[derive(Debug, Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// Attach to the global window and its document.
    pub fn from_window() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or_else(|| PageError::missing_element("window"))?;
        let document = window
            .document()
            .ok_or_else(|| PageError::missing_element("document"))?;
        Ok(Self { window, document })
    }

    /// The browser window, for binding load and resize listeners.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Whether the `load` event has already fired.
    pub fn is_loaded(&self) -> bool {
        self.document.ready_state() == "complete"
    }

    fn computed(&self, node: &Element, property: &str) -> Option<String> {
        self.window
            .get_computed_style(node)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok())
    }

    /// Computed CSS length property in pixels, 0 when unavailable.
    fn computed_px(&self, node: &Element, property: &str) -> f64 {
        self.computed(node, property)
            .and_then(|value| value.trim_end_matches("px").trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// Vertical padding and border, counted in the CSS `height` of
    /// `border-box` elements only.
    fn vertical_box_extra(&self, node: &Element) -> f64 {
        if self.computed(node, "box-sizing").as_deref() != Some("border-box") {
            return 0.0;
        }
        [
            "padding-top",
            "padding-bottom",
            "border-top-width",
            "border-bottom-width",
        ]
        .iter()
        .map(|property| self.computed_px(node, property))
        .sum()
    }
}

fn collect(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|index| collection.item(index))
        .collect()
}

impl Renderer for WebPage {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<Element> {
        collect(self.document.get_elements_by_class_name(class))
    }

    fn descendant_by_class(&self, scope: &Element, class: &str) -> Option<Element> {
        scope.get_elements_by_class_name(class).item(0)
    }

    fn labels_in(&self, scope: &Element) -> Vec<Element> {
        collect(scope.get_elements_by_tag_name("label"))
    }

    fn first_child(&self, node: &Element) -> Option<Element> {
        node.first_element_child()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        collect(node.children())
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn previous_sibling(&self, node: &Element) -> Option<Element> {
        node.previous_element_sibling()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::warn!("Failed to set attribute {name}: {e:?}");
        }
    }

    fn width(&self, node: &Element) -> f64 {
        content_size(
            f64::from(node.client_width()),
            self.computed_px(node, "padding-left"),
            self.computed_px(node, "padding-right"),
        )
    }

    fn height(&self, node: &Element) -> f64 {
        content_size(
            f64::from(node.client_height()),
            self.computed_px(node, "padding-top"),
            self.computed_px(node, "padding-bottom"),
        )
    }

    fn set_height(&self, node: &Element, height: f64) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let css_height = height + self.vertical_box_extra(node);
        if let Err(e) = element
            .style()
            .set_property("height", &format!("{css_height}px"))
        {
            log::warn!("Failed to set height: {e:?}");
        }
    }

    fn create_image(&self, class: &str, src: Option<&str>) -> Element {
        let image = self
            .document
            .create_element("img")
            .expect("img is a valid tag name");
        image.set_class_name(class);
        if let Some(src) = src {
            self.set_attribute(&image, "src", src);
        }
        image
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            log::warn!("Failed to append element: {e:?}");
        }
    }

    fn prepend_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.prepend_with_node_1(child) {
            log::warn!("Failed to prepend element: {e:?}");
        }
    }

    fn detach(&self, node: &Element) {
        node.remove();
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn toggle_class(&self, node: &Element, class: &str, enabled: bool) {
        if let Err(e) = node.class_list().toggle_with_force(class, enabled) {
            log::warn!("Failed to toggle class {class}: {e:?}");
        }
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Err(e) = node.toggle_attribute_with_force("disabled", disabled) {
            log::warn!("Failed to set disabled: {e:?}");
        }
    }

    fn is_disabled(&self, node: &Element) -> bool {
        node.has_attribute("disabled")
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn click(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            element.click();
        }
    }
}
