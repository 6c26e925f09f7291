//! Highlight boxes and alignment guides.

use kurbo::Rect;

use super::Viewport;
use crate::dom::ElementHandle;

/// Guide line thickness in CSS pixels.
pub const GUIDE_THICKNESS: f64 = 1.0;

/// Four alignment lines hugging an element's border box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLines {
    /// Just inside the top edge, spanning the viewport width.
    pub top: Rect,
    /// Just inside the right edge, spanning the document height.
    pub right: Rect,
    /// Just inside the bottom edge, spanning the viewport width.
    pub bottom: Rect,
    /// On the left edge, spanning the document height.
    pub left: Rect,
}

impl GuideLines {
    /// Lines in top, right, bottom, left order.
    pub fn as_array(&self) -> [Rect; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

/// Highlight geometry for one tracked element, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub rect: Rect,
    pub guides: Option<GuideLines>,
}

/// Compute the highlight for `element`.
///
/// `None` when the element is missing or detached.
pub fn highlight<E: ElementHandle>(
    element: Option<&E>,
    viewport: &Viewport,
    show_guides: bool,
) -> Option<Highlight> {
    let element = element.filter(|e| e.is_connected())?;
    let rect = viewport.to_document(element.bounding_rect());
    Some(Highlight {
        rect,
        guides: show_guides.then(|| guide_lines(rect, viewport)),
    })
}

/// Guides for a document-space rect.
pub fn guide_lines(rect: Rect, viewport: &Viewport) -> GuideLines {
    let x0 = viewport.scroll.x;
    let x1 = x0 + viewport.size.width;
    let height = viewport.guide_height();

    GuideLines {
        top: Rect::new(x0, rect.y0, x1, rect.y0 + GUIDE_THICKNESS),
        right: Rect::new(rect.x1 - GUIDE_THICKNESS, 0.0, rect.x1, height),
        bottom: Rect::new(x0, rect.y1 - GUIDE_THICKNESS, x1, rect.y1),
        left: Rect::new(rect.x0, 0.0, rect.x0 + GUIDE_THICKNESS, height),
    }
}
