//! Info panel placement next to the cursor.

use kurbo::{Point, Size};

/// Panel dimensions and distance from the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub size: Size,
    pub cursor_offset: f64,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            size: Size::new(300.0, 400.0),
            cursor_offset: 15.0,
        }
    }
}

/// Top-left corner of the panel in viewport coordinates.
///
/// The panel sits to the right of the cursor and flips to the left when it
/// would overflow the viewport width. It is pushed up when it would overflow
/// the bottom. Neither coordinate goes negative.
pub fn place_panel(cursor: Point, viewport: Size, layout: &PanelLayout) -> Point {
    let mut x = cursor.x + layout.cursor_offset;
    if x + layout.size.width > viewport.width {
        x = (cursor.x - layout.size.width - layout.cursor_offset).max(0.0);
    }

    let mut y = cursor.y;
    if y + layout.size.height > viewport.height {
        y = (viewport.height - layout.size.height).max(0.0);
    }

    Point::new(x, y)
}
