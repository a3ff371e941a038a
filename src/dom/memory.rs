//! In-memory DOM used by tests and the headless preview.
//!
//! `MemoryPage` keeps a flat arena of elements addressed by [`NodeId`].
//! Detached elements stay in the arena so handles never dangle. Layout is
//! not computed: widths and heights are whatever the page builder set.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::Renderer;
use crate::constants::{classes, ids};

/// Handle to an element of a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    width: f64,
    height: f64,
    disabled: bool,
    checked: bool,
    clicks: u32,
}

/// Element arena; index 0 is `<body>`.
#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, tag: &str) -> NodeId {
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            ..NodeData::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    fn insert(&mut self, parent: NodeId, child: NodeId, at_start: bool) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        let children = &mut self.node_mut(parent).children;
        if at_start {
            children.insert(0, child);
        } else {
            children.push(child);
        }
    }

    /// Descendants of `scope` in document order (excluding `scope`).
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }
}

/// In-memory page implementing [`Renderer`].
#[derive(Debug)]
pub struct MemoryPage {
    tree: RefCell<Tree>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Create an empty page holding only `<body>`.
    pub fn new() -> Self {
        let mut tree = Tree { nodes: Vec::new() };
        tree.push("body");
        Self {
            tree: RefCell::new(tree),
        }
    }

    /// The `<body>` element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element under `parent`.
    pub fn add_element(
        &self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        class_list: &[&str],
    ) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let node = tree.push(tag);
        if let Some(id) = id {
            tree.node_mut(node)
                .attributes
                .insert("id".to_string(), id.to_string());
        }
        tree.node_mut(node).classes = class_list.iter().map(|c| c.to_string()).collect();
        tree.insert(parent, node, false);
        node
    }

    /// Set the rendered size of an element.
    pub fn set_size(&self, node: NodeId, width: f64, height: f64) {
        let mut tree = self.tree.borrow_mut();
        let data = tree.node_mut(node);
        data.width = width;
        data.height = height;
    }

    /// Set the rendered width of an element, as a viewport resize would.
    pub fn set_width(&self, node: NodeId, width: f64) {
        self.tree.borrow_mut().node_mut(node).width = width;
    }

    /// Check a radio and uncheck the other radios sharing its `name`.
    pub fn select_radio(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        let name = tree.node(node).attributes.get("name").cloned();
        if let Some(name) = name {
            for data in tree.nodes.iter_mut() {
                if data.attributes.get("name") == Some(&name) {
                    data.checked = false;
                }
            }
        }
        tree.node_mut(node).checked = true;
    }

    /// Number of clicks dispatched on an element.
    pub fn click_count(&self, node: NodeId) -> u32 {
        self.tree.borrow().node(node).clicks
    }

    /// Whether the element is reachable from `<body>`.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        let mut current = node;
        loop {
            if current == self.root() {
                return true;
            }
            match tree.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// `src` attributes of the children of `node`, in order.
    pub fn child_sources(&self, node: NodeId) -> Vec<Option<String>> {
        let tree = self.tree.borrow();
        tree.node(node)
            .children
            .iter()
            .map(|child| tree.node(*child).attributes.get("src").cloned())
            .collect()
    }

    /// Serialize the attached tree as indented HTML.
    pub fn to_html(&self) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        write_node(&tree, self.root(), 0, &mut out);
        out
    }

    /// Item bid/sell page skeleton: pictures pane, details pane and,
    /// with `with_uploader`, the add picture control.
    pub fn item_form(with_uploader: bool) -> Self {
        let page = Self::new();
        let root = page.root();
        let left = page.add_element(root, "div", Some(ids::LEFT_PART), &[]);
        page.add_element(left, "div", Some(ids::PICTURES_DIV), &[]);
        if with_uploader {
            let add = page.add_element(left, "div", Some(ids::CLICK_TO_ADD_PICTURE), &[]);
            let input =
                page.add_element(add, "input", Some(ids::INPUT_CLICK_TO_ADD_PICTURE), &[]);
            page.set_attribute(&input, "type", "file");
        }
        let right = page.add_element(root, "div", Some(ids::RIGHT_PART), &[]);
        page.set_size(left, 200.0, 0.0);
        page.set_size(right, 600.0, 480.0);
        page
    }

    /// Welcome page skeleton: search mode radios, both filter fieldsets
    /// and one item card per identifier. Purchases is selected.
    pub fn welcome(item_ids: &[&str]) -> Self {
        let page = Self::new();
        let root = page.root();
        let form = page.add_element(root, "form", None, &[]);

        for radio_id in [ids::PURCHASES, ids::SALES] {
            let radio = page.add_element(form, "input", Some(radio_id), &[]);
            page.set_attribute(&radio, "type", "radio");
            page.set_attribute(&radio, "name", "mode");
        }
        if let Some(purchases) = page.element_by_id(ids::PURCHASES) {
            page.select_radio(purchases);
        }

        for (fieldset_id, fields) in [
            (ids::PURCHASES_FIELDSET, ids::PURCHASE_FIELDS),
            (ids::SALES_FIELDSET, ids::SALE_FIELDS),
        ] {
            let fieldset = page.add_element(form, "fieldset", Some(fieldset_id), &[]);
            for field in fields {
                let input = page.add_element(fieldset, "input", Some(field), &[]);
                page.set_attribute(&input, "type", "checkbox");
                let label = page.add_element(fieldset, "label", None, &[]);
                page.set_attribute(&label, "for", field);
            }
        }

        for item_id in item_ids {
            let card = page.add_element(root, "div", None, &[classes::ITEM_CARD]);
            let link_id = format!("i{item_id}");
            let link = page.add_element(card, "a", Some(&link_id), &[]);
            page.add_element(link, "div", None, &[classes::ITEM_CARD_IMAGES]);
        }

        page
    }
}

fn write_node(tree: &Tree, id: NodeId, depth: usize, out: &mut String) {
    let data = tree.node(id);
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", data.tag);
    for (name, value) in &data.attributes {
        let _ = write!(out, " {name}=\"{value}\"");
    }
    if !data.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", data.classes.join(" "));
    }
    if data.disabled {
        out.push_str(" disabled");
    }
    if data.checked {
        out.push_str(" checked");
    }
    out.push_str(">\n");
    for child in &data.children {
        write_node(tree, *child, depth + 1, out);
    }
    if !matches!(data.tag.as_str(), "img" | "input") {
        let _ = writeln!(out, "{indent}</{}>", data.tag);
    }
}

impl Renderer for MemoryPage {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(self.root())
            .into_iter()
            .find(|node| tree.node(*node).attributes.get("id").map(String::as_str) == Some(id))
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(self.root())
            .into_iter()
            .filter(|node| tree.has_class(*node, class))
            .collect()
    }

    fn descendant_by_class(&self, scope: &NodeId, class: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(*scope)
            .into_iter()
            .find(|node| tree.has_class(*node, class))
    }

    fn labels_in(&self, scope: &NodeId) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(*scope)
            .into_iter()
            .filter(|node| tree.node(*node).tag == "label")
            .collect()
    }

    fn first_child(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.borrow().node(*node).children.first().copied()
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.tree.borrow().node(*node).children.clone()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.borrow().node(*node).parent
    }

    fn previous_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let parent = tree.node(*node).parent?;
        let siblings = &tree.node(parent).children;
        let position = siblings.iter().position(|child| child == node)?;
        position.checked_sub(1).map(|prev| siblings[prev])
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().node(*node).attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.tree
            .borrow_mut()
            .node_mut(*node)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn width(&self, node: &NodeId) -> f64 {
        self.tree.borrow().node(*node).width
    }

    fn height(&self, node: &NodeId) -> f64 {
        self.tree.borrow().node(*node).height
    }

    fn set_height(&self, node: &NodeId, height: f64) {
        let mut tree = self.tree.borrow_mut();
        let data = tree.node_mut(*node);
        data.height = height;
        data.attributes
            .insert("style".to_string(), format!("height: {height}px;"));
    }

    fn create_image(&self, class: &str, src: Option<&str>) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let node = tree.push("img");
        let data = tree.node_mut(node);
        data.classes.push(class.to_string());
        if let Some(src) = src {
            data.attributes.insert("src".to_string(), src.to_string());
        }
        node
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.tree.borrow_mut().insert(*parent, *child, false);
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) {
        self.tree.borrow_mut().insert(*parent, *child, true);
    }

    fn detach(&self, node: &NodeId) {
        self.tree.borrow_mut().detach(*node);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().has_class(*node, class)
    }

    fn toggle_class(&self, node: &NodeId, class: &str, enabled: bool) {
        let mut tree = self.tree.borrow_mut();
        let classes = &mut tree.node_mut(*node).classes;
        let present = classes.iter().any(|c| c == class);
        if enabled && !present {
            classes.push(class.to_string());
        } else if !enabled {
            classes.retain(|c| c != class);
        }
    }

    fn set_disabled(&self, node: &NodeId, disabled: bool) {
        self.tree.borrow_mut().node_mut(*node).disabled = disabled;
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        self.tree.borrow().node(*node).disabled
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.tree.borrow().node(*node).checked
    }

    fn click(&self, node: &NodeId) {
        self.tree.borrow_mut().node_mut(*node).clicks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id_and_class() {
        let page = MemoryPage::welcome(&["42", "7"]);
        assert!(page.element_by_id("i42").is_some());
        assert!(page.element_by_id("missing").is_none());
        assert_eq!(page.elements_by_class(classes::ITEM_CARD).len(), 2);

        let fieldset = page.require_by_id(ids::SALES_FIELDSET).unwrap();
        assert_eq!(page.labels_in(&fieldset).len(), 3);
    }

    #[test]
    fn test_detach_keeps_handle_usable() {
        let page = MemoryPage::new();
        let div = page.add_element(page.root(), "div", None, &[]);
        let a = page.create_image("picture", Some("a.png"));
        let b = page.create_image("picture", Some("b.png"));
        page.append_child(&div, &a);
        page.append_child(&div, &b);
        assert_eq!(page.previous_sibling(&b), Some(a));
        assert_eq!(page.previous_sibling(&a), None);

        page.detach(&a);
        assert!(!page.is_attached(a));
        assert_eq!(page.parent(&a), None);
        assert_eq!(page.children(&div), vec![b]);

        page.prepend_child(&div, &a);
        assert_eq!(page.children(&div), vec![a, b]);
        assert_eq!(
            page.child_sources(div),
            vec![Some("a.png".to_string()), Some("b.png".to_string())]
        );
    }

    #[test]
    fn test_select_radio_unchecks_group() {
        let page = MemoryPage::welcome(&[]);
        let purchases = page.require_by_id(ids::PURCHASES).unwrap();
        let sales = page.require_by_id(ids::SALES).unwrap();
        assert!(page.is_checked(&purchases));

        page.select_radio(sales);
        assert!(page.is_checked(&sales));
        assert!(!page.is_checked(&purchases));
    }

    #[test]
    fn test_toggle_class_is_idempotent() {
        let page = MemoryPage::new();
        let img = page.create_image("a", None);
        page.toggle_class(&img, "b", true);
        page.toggle_class(&img, "b", true);
        assert!(page.has_class(&img, "b"));
        page.toggle_class(&img, "b", false);
        assert!(!page.has_class(&img, "b"));
        assert!(page.has_class(&img, "a"));
    }

    #[test]
    fn test_to_html_skips_detached() {
        let page = MemoryPage::item_form(false);
        let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
        let img = page.create_image(classes::PICTURE, Some("x.png"));
        page.append_child(&pictures, &img);
        assert!(page.to_html().contains("src=\"x.png\""));

        page.detach(&img);
        assert!(!page.to_html().contains("x.png"));
    }
}
