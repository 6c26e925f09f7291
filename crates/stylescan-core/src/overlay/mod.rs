//! Overlay geometry: highlight boxes, guide lines, spacing indicators and
//! info panel placement.
//!
//! Everything here is recomputed from live element rects on each call.
//! Inputs are viewport-space rects from the page; outputs are document-space
//! rects ready for absolutely positioned overlay nodes.

mod highlight;
mod panel;
mod spacing;

pub use highlight::{GuideLines, Highlight, GUIDE_THICKNESS, guide_lines, highlight};
pub use panel::{PanelLayout, place_panel};
pub use spacing::{
    Side, SpacingIndicator, SpacingRelation, spacing_between, spacing_indicators,
};

use kurbo::{Point, Rect, Size, Vec2};

/// Window metrics sampled for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current scroll offset (`scrollX`, `scrollY`).
    pub scroll: Vec2,
    /// Visible area size (`innerWidth`, `innerHeight`).
    pub size: Size,
    /// Full scrollable height of the document.
    pub document_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll: Vec2::ZERO,
            size: Size::new(1280.0, 800.0),
            document_height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(scroll: Vec2, size: Size, document_height: f64) -> Self {
        Self {
            scroll,
            size,
            document_height,
        }
    }

    /// Convert a viewport-space rect to document space.
    pub fn to_document(&self, rect: Rect) -> Rect {
        rect + self.scroll
    }

    /// Height that vertical guides must span.
    pub fn guide_height(&self) -> f64 {
        self.document_height.max(self.size.height)
    }
}

/// All overlay geometry for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFrame {
    pub hover: Option<Highlight>,
    pub selection: Option<Highlight>,
    pub spacing: Vec<SpacingIndicator>,
    /// Top-left of the info panel in viewport coordinates, `None` when hidden.
    pub panel: Option<Point>,
}

impl OverlayFrame {
    pub fn spacing_on(&self, side: Side) -> Option<&SpacingIndicator> {
        self.spacing.iter().find(|s| s.side == side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_document_applies_scroll() {
        let viewport = Viewport::new(Vec2::new(5.0, 100.0), Size::new(800.0, 600.0), 3000.0);
        let rect = viewport.to_document(Rect::new(10.0, 10.0, 20.0, 30.0));
        assert_eq!(rect, Rect::new(15.0, 110.0, 25.0, 130.0));
    }

    #[test]
    fn test_guide_height_covers_viewport() {
        let viewport = Viewport::new(Vec2::ZERO, Size::new(800.0, 600.0), 200.0);
        assert!((viewport.guide_height() - 600.0).abs() < f64::EPSILON);
    }
}
