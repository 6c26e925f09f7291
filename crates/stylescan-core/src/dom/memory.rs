//! In-memory element tree for tests and headless use.

use super::{Declaration, DomError, DomResult, ElementHandle};
use kurbo::{Rect, Size};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct MemoryNode {
    id: String,
    tag_name: String,
    class_name: String,
    rect: Rect,
    computed: Vec<Declaration>,
    inline: Vec<Declaration>,
    authored: Vec<String>,
    connected: bool,
    parent: Option<Weak<RefCell<MemoryNode>>>,
    children: Vec<Rc<RefCell<MemoryNode>>>,
}

/// Element handle backed by a shared in-memory node.
///
/// Cloning shares the node, so edits through one handle are visible through
/// every other handle, like a real DOM reference.
#[derive(Debug, Clone)]
pub struct MemoryElement {
    node: Rc<RefCell<MemoryNode>>,
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl MemoryElement {
    /// Create a connected element with the given tag name.
    pub fn new(tag_name: &str) -> Self {
        Self {
            node: Rc::new(RefCell::new(MemoryNode {
                tag_name: tag_name.to_uppercase(),
                connected: true,
                ..Default::default()
            })),
        }
    }

    pub fn with_id(self, id: &str) -> Self {
        self.node.borrow_mut().id = id.to_string();
        self
    }

    pub fn with_class(self, class_name: &str) -> Self {
        self.node.borrow_mut().class_name = class_name.to_string();
        self
    }

    /// Set the viewport-space border box.
    pub fn with_rect(self, rect: Rect) -> Self {
        self.node.borrow_mut().rect = rect;
        self
    }

    pub fn with_computed(self, property: &str, value: &str) -> Self {
        upsert(&mut self.node.borrow_mut().computed, property, value);
        self
    }

    pub fn with_inline(self, property: &str, value: &str) -> Self {
        upsert(&mut self.node.borrow_mut().inline, property, value);
        self
    }

    pub fn with_authored(self, property: &str) -> Self {
        self.node.borrow_mut().authored.push(property.to_string());
        self
    }

    /// Move the element, e.g. to simulate scrolling content.
    pub fn set_rect(&self, rect: Rect) {
        self.node.borrow_mut().rect = rect;
    }

    /// Attach `child` under this element.
    pub fn append_child(&self, child: &MemoryElement) {
        child.node.borrow_mut().parent = Some(Rc::downgrade(&self.node));
        self.node.borrow_mut().children.push(child.node.clone());
    }

    /// Remove this element (and its subtree) from the document.
    pub fn detach(&self) {
        let parent = self.node.borrow_mut().parent.take();
        if let Some(parent) = parent.and_then(|p| p.upgrade()) {
            parent
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(c, &self.node));
        }
        set_connected(&self.node, false);
    }
}

fn set_connected(node: &Rc<RefCell<MemoryNode>>, connected: bool) {
    node.borrow_mut().connected = connected;
    let children = node.borrow().children.clone();
    for child in &children {
        set_connected(child, connected);
    }
}

fn upsert(declarations: &mut Vec<Declaration>, property: &str, value: &str) {
    if let Some(entry) = declarations.iter_mut().find(|(p, _)| p == property) {
        entry.1 = value.to_string();
    } else {
        declarations.push((property.to_string(), value.to_string()));
    }
}

impl ElementHandle for MemoryElement {
    fn is_connected(&self) -> bool {
        self.node.borrow().connected
    }

    fn id(&self) -> String {
        self.node.borrow().id.clone()
    }

    fn tag_name(&self) -> String {
        self.node.borrow().tag_name.clone()
    }

    fn class_name(&self) -> String {
        self.node.borrow().class_name.clone()
    }

    fn bounding_rect(&self) -> Rect {
        let node = self.node.borrow();
        // Detached nodes report an empty box, as browsers do.
        if node.connected { node.rect } else { Rect::ZERO }
    }

    fn offset_size(&self) -> Size {
        self.bounding_rect().size()
    }

    fn computed_declarations(&self) -> Vec<Declaration> {
        let node = self.node.borrow();
        // Inline declarations are part of the resolved style too.
        let mut computed = node.computed.clone();
        for (property, value) in &node.inline {
            upsert(&mut computed, property, value);
        }
        computed
    }

    fn inline_declarations(&self) -> Vec<Declaration> {
        self.node.borrow().inline.clone()
    }

    fn authored_properties(&self) -> Vec<String> {
        let node = self.node.borrow();
        let mut properties: Vec<String> = node.inline.iter().map(|(p, _)| p.clone()).collect();
        for property in &node.authored {
            if !properties.contains(property) {
                properties.push(property.clone());
            }
        }
        properties
    }

    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(element) = current {
            if element == *self {
                return true;
            }
            current = element.parent();
        }
        false
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.node.borrow().parent.as_ref()?.upgrade()?;
        Some(Self { node: parent })
    }

    fn set_style_property(&self, property: &str, value: &str) -> DomResult<()> {
        let mut node = self.node.borrow_mut();
        if !node.connected {
            return Err(DomError::Detached);
        }
        if value.is_empty() {
            node.inline.retain(|(p, _)| p != property);
        } else {
            upsert(&mut node.inline, property, value);
        }
        Ok(())
    }

    fn style_property(&self, property: &str) -> Option<String> {
        self.node
            .borrow()
            .inline
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let parent = MemoryElement::new("div");
        let child = MemoryElement::new("span");
        parent.append_child(&child);

        assert!(parent.contains(&child));
        assert!(parent.contains(&parent));
        assert!(!child.contains(&parent));
    }

    #[test]
    fn test_detach_disconnects_subtree() {
        let root = MemoryElement::new("body");
        let parent = MemoryElement::new("div");
        let child = MemoryElement::new("span").with_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        root.append_child(&parent);
        parent.append_child(&child);

        parent.detach();

        assert!(!parent.is_connected());
        assert!(!child.is_connected());
        assert_eq!(child.bounding_rect(), Rect::ZERO);
        assert!(!root.contains(&child));
    }

    #[test]
    fn test_set_style_property() {
        let el = MemoryElement::new("div");
        el.set_style_property("color", "red").unwrap();
        assert_eq!(el.style_property("color").as_deref(), Some("red"));

        el.set_style_property("color", "").unwrap();
        assert_eq!(el.style_property("color"), None);
    }

    #[test]
    fn test_set_style_on_detached_fails() {
        let el = MemoryElement::new("div");
        el.detach();
        assert_eq!(el.set_style_property("color", "red"), Err(DomError::Detached));
    }

    #[test]
    fn test_has_ancestor_with_id() {
        let root = MemoryElement::new("div").with_id("element-scan-root");
        let inner = MemoryElement::new("button");
        root.append_child(&inner);

        assert!(inner.has_ancestor_with_id(&["element-scan-root"]));
        assert!(!inner.has_ancestor_with_id(&["other"]));
    }
}
