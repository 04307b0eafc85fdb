//! Element lookup capability used by the navigation controller.
//!
//! The controller never talks to a rendering engine directly. It sees the
//! page through [`Document`]: look an element up by id, list elements by
//! class, read an attribute, and edit a class list. Anything that can answer
//! those questions can host the controller.
//!
//! [`MemoryDocument`] is a small in-memory tree implementing the trait. It
//! backs the unit tests and the `simulate` command, and can be built from the
//! rendered layout with [`crate::layout::document_from_config`].

use std::collections::{BTreeMap, BTreeSet};

/// Opaque handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// What the controller needs from a page.
pub trait Document {
    /// Look up an element by its `id` attribute.
    fn find(&self, id: &str) -> Option<ElementId>;

    /// All elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// True when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// Current viewport width in logical pixels.
    fn viewport_width(&self) -> u32;

    /// Path component of the current URL.
    fn current_path(&self) -> String;

    /// Set or clear `class` depending on `on`.
    fn set_class(&mut self, element: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

/// An in-memory element tree with a viewport width and a current path.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    viewport_width: u32,
    current_path: String,
}

impl MemoryDocument {
    /// An empty document containing only a `body` root element.
    pub fn new(viewport_width: u32, current_path: &str) -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                parent: None,
                classes: BTreeSet::new(),
                attributes: BTreeMap::new(),
            }],
            viewport_width,
            current_path: current_path.to_string(),
        }
    }

    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Append a new child element under `parent` and return its handle.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> ElementId {
        self.nodes.push(Node {
            tag: tag.to_string(),
            parent: Some(parent),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
        });
        ElementId(self.nodes.len() - 1)
    }

    /// Append a child element carrying the given `id` attribute.
    pub fn append_with_id(&mut self, parent: ElementId, tag: &str, id: &str) -> ElementId {
        let element = self.append(parent, tag);
        self.set_attribute(element, "id", id);
        element
    }

    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element.0).map(|n| n.tag.as_str())
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    pub fn set_current_path(&mut self, path: &str) {
        self.current_path = path.to_string();
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element.0).and_then(|n| n.parent)
    }
}

impl Document for MemoryDocument {
    fn find(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|n| n.attributes.get("id").is_some_and(|v| v == id))
            .map(ElementId)
    }

    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classes.contains(class))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(element.0)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element.0)
            .is_some_and(|n| n.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.classes.remove(class);
        }
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.parent(el);
        }
        false
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn current_path(&self) -> String {
        self.current_path.clone()
    }
}
