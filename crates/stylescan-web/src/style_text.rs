//! Inline `style` attribute text for the injected overlay nodes.

use kurbo::{Point, Rect};
use stylescan_core::config::label_offset;
use stylescan_core::overlay::{GUIDE_THICKNESS, PanelLayout};
use stylescan_core::{SerializableColor, SpacingIndicator};

/// Hides a node without removing it.
pub const HIDDEN: &str = "display: none;";

/// Highlight border width in CSS pixels.
pub const HIGHLIGHT_BORDER: f64 = 2.0;

/// Spacing line width in CSS pixels.
pub const SPACING_LINE_WIDTH: f64 = 2.0;

/// Format a length in CSS pixels, dropping a zero fraction.
pub fn px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}px", rounded)
}

fn absolute_at(origin: Point) -> String {
    format!(
        "position: absolute; top: 0; left: 0; transform: translate({}, {}); pointer-events: none; box-sizing: border-box;",
        px(origin.x),
        px(origin.y)
    )
}

/// Bordered, tinted box over an element.
pub fn highlight_style(rect: Rect, border: SerializableColor, fill: SerializableColor, z_index: i32) -> String {
    format!(
        "{} display: block; width: {}; height: {}; border: {} solid {}; background-color: {}; z-index: {};",
        absolute_at(rect.origin()),
        px(rect.width()),
        px(rect.height()),
        px(HIGHLIGHT_BORDER),
        border.css(),
        fill.css(),
        z_index
    )
}

/// One dashed alignment guide.
pub fn guide_style(rect: Rect, color: SerializableColor, z_index: i32) -> String {
    let edge = if rect.width() <= GUIDE_THICKNESS {
        "border-left"
    } else {
        "border-top"
    };
    format!(
        "{} display: block; width: {}; height: {}; {}: {} dashed {}; z-index: {};",
        absolute_at(rect.origin()),
        px(rect.width()),
        px(rect.height()),
        edge,
        px(GUIDE_THICKNESS),
        color.css(),
        z_index
    )
}

/// Dashed line of a spacing indicator.
pub fn spacing_line_style(indicator: &SpacingIndicator, color: SerializableColor, z_index: i32) -> String {
    let length = px(indicator.length());
    let (width, height, edge) = if indicator.side.is_vertical() {
        ("0px".to_string(), length, "border-left")
    } else {
        (length, "0px".to_string(), "border-top")
    };
    format!(
        "{} display: block; width: {}; height: {}; {}: {} dashed {}; z-index: {};",
        absolute_at(indicator.start),
        width,
        height,
        edge,
        px(SPACING_LINE_WIDTH),
        color.css(),
        z_index
    )
}

/// Pixel label next to a spacing line.
pub fn spacing_label_style(
    indicator: &SpacingIndicator,
    background: SerializableColor,
    text: SerializableColor,
    z_index: i32,
) -> String {
    let position = indicator.label_anchor + label_offset(indicator.side);
    format!(
        "{} display: block; padding: 2px 8px; border-radius: 4px; font: 12px monospace; white-space: nowrap; background-color: {}; color: {}; z-index: {};",
        absolute_at(position),
        background.css(),
        text.css(),
        z_index
    )
}

/// Text shown in a spacing label.
pub fn spacing_label_text(indicator: &SpacingIndicator) -> String {
    format!("{}px", indicator.label)
}

/// Fixed-position info panel at `position` (viewport coordinates).
pub fn panel_style(position: Point, layout: &PanelLayout, z_index: i32) -> String {
    format!(
        "position: fixed; left: {}; top: {}; width: {}; height: {}; z-index: {}; display: flex; flex-direction: column; box-sizing: border-box; \
         background: rgba(255, 255, 255, 0.95); color: #111827; border: 1px solid #f3f4f6; border-radius: 6px; \
         box-shadow: 0 4px 20px rgba(0, 0, 0, 0.08); font: 12px monospace; overflow: hidden;",
        px(position.x),
        px(position.y),
        px(layout.size.width),
        px(layout.size.height),
        z_index
    )
}

/// Floating toggle button in the top-right corner.
pub fn toggle_button_style(active: bool, visible: bool, z_index: i32) -> String {
    if !visible {
        return HIDDEN.to_string();
    }
    let background = if active { "#22c55e" } else { "#1f2937" };
    format!(
        "position: fixed; top: 8px; right: 8px; z-index: {}; padding: 8px 12px; border: none; border-radius: 4px; \
         font: 14px sans-serif; color: #ffffff; background: {}; box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2); cursor: pointer;",
        z_index, background
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylescan_core::overlay::{SpacingRelation, spacing_between};
    use stylescan_core::Side;

    fn color() -> SerializableColor {
        SerializableColor::new(255, 0, 0, 255)
    }

    #[test]
    fn test_px() {
        assert_eq!(px(12.0), "12px");
        assert_eq!(px(12.345), "12.35px");
        assert_eq!(px(-3.5), "-3.5px");
    }

    #[test]
    fn test_highlight_style() {
        let style = highlight_style(Rect::new(10.0, 20.0, 110.0, 70.0), color(), color(), 99993);
        assert!(style.contains("translate(10px, 20px)"));
        assert!(style.contains("width: 100px; height: 50px;"));
        assert!(style.contains("border: 2px solid rgba(255, 0, 0, 1);"));
        assert!(style.contains("pointer-events: none;"));
        assert!(style.ends_with("z-index: 99993;"));
    }

    #[test]
    fn test_guide_style_orientation() {
        let vertical = guide_style(Rect::new(10.0, 0.0, 11.0, 500.0), color(), 1);
        assert!(vertical.contains("border-left: 1px dashed"));
        let horizontal = guide_style(Rect::new(0.0, 10.0, 800.0, 11.0), color(), 1);
        assert!(horizontal.contains("border-top: 1px dashed"));
    }

    #[test]
    fn test_spacing_styles() {
        let gaps = spacing_between(
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(0.0, 100.0, 50.0, 150.0),
            SpacingRelation::Disjoint,
        );
        let top = gaps.iter().find(|g| g.side == Side::Top).unwrap();

        let line = spacing_line_style(top, color(), 99996);
        assert!(line.contains("translate(25px, 50px)"));
        assert!(line.contains("width: 0px; height: 50px; border-left: 2px dashed"));

        // Anchor (25, 75) plus the vertical label offset.
        let label = spacing_label_style(top, color(), color(), 99997);
        assert!(label.contains("translate(35px, 65px)"));
        assert_eq!(spacing_label_text(top), "50px");
    }

    #[test]
    fn test_toggle_button_hidden() {
        assert_eq!(toggle_button_style(true, false, 1), HIDDEN);
        assert!(toggle_button_style(true, true, 1).contains("#22c55e"));
    }

    #[test]
    fn test_panel_style() {
        let style = panel_style(Point::new(115.0, 20.0), &PanelLayout::default(), 99994);
        assert!(style.starts_with("position: fixed; left: 115px; top: 20px; width: 300px; height: 400px; z-index: 99994;"));
    }
}
