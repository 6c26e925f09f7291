//! DOM abstraction for tracked page elements.
//!
//! The inspector never owns page nodes. It holds cheap handles that may be
//! detached by the page at any time, so every consumer re-validates with
//! [`ElementHandle::is_connected`] before reading geometry or styles.

mod memory;

pub use memory::MemoryElement;

use kurbo::{Rect, Size};
use thiserror::Error;

/// DOM access errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Element is no longer attached to the document")]
    Detached,
    #[error("Style rejected: {property}: {value}")]
    StyleRejected { property: String, value: String },
    #[error("DOM unavailable: {0}")]
    Unavailable(String),
}

/// Result type for DOM operations.
pub type DomResult<T> = Result<T, DomError>;

/// A single `property: value` pair as reported by the page.
pub type Declaration = (String, String);

/// Non-owning handle to a live page element.
///
/// Equality is node identity. Implementations exist for `web-sys` elements
/// (in the web shell) and for the in-memory tree used by tests.
pub trait ElementHandle: Clone + PartialEq {
    /// Whether the node is still part of the document.
    fn is_connected(&self) -> bool;

    /// The element's `id` attribute (empty when unset).
    fn id(&self) -> String;

    /// The element's tag name as reported by the DOM.
    fn tag_name(&self) -> String;

    /// The raw `class` attribute.
    fn class_name(&self) -> String;

    /// Border box in viewport coordinates (`getBoundingClientRect`).
    fn bounding_rect(&self) -> Rect;

    /// Rendered layout size (`offsetWidth` / `offsetHeight`).
    fn offset_size(&self) -> Size;

    /// Every resolved declaration the rendering engine applies.
    fn computed_declarations(&self) -> Vec<Declaration>;

    /// Declarations from the element's own `style` attribute.
    fn inline_declarations(&self) -> Vec<Declaration>;

    /// Property names named by inline style or matching stylesheet rules.
    ///
    /// Unreadable stylesheets are skipped by implementations.
    fn authored_properties(&self) -> Vec<String>;

    /// Inclusive descendant check, like `Node.contains`.
    fn contains(&self, other: &Self) -> bool;

    /// Parent element, if any.
    fn parent(&self) -> Option<Self>;

    /// Set a single inline style property on the live element.
    fn set_style_property(&self, property: &str, value: &str) -> DomResult<()>;

    /// Read back a single inline style property.
    fn style_property(&self, property: &str) -> Option<String>;

    /// Walk up from this element (inclusive) looking for one of `ids`.
    fn has_ancestor_with_id(&self, ids: &[&str]) -> bool {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            let id = element.id();
            if !id.is_empty() && ids.contains(&id.as_str()) {
                return true;
            }
            current = element.parent();
        }
        false
    }
}
