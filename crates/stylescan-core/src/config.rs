//! Inspector configuration, overlay theme and the fixed DOM contract
//! (element ids and z-index layers) shared with the web shell.

use kurbo::{Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::overlay::{PanelLayout, Side};

/// Ids of the nodes the inspector injects into the page.
pub mod element_id {
    use crate::overlay::Side;

    pub const ROOT: &str = "element-scan-root";
    pub const SHADOW_ROOT: &str = "element-scan-shadow-root";
    pub const TOGGLE_BUTTON: &str = "element-scan-toggle-btn";
    pub const HOVER_HIGHLIGHT: &str = "element-scan-hover-highlight-overlay";
    pub const SELECTED_HIGHLIGHT: &str = "element-scan-selected-highlight-overlay";
    pub const ELEMENT_INFO: &str = "element-scan-element-info-overlay";

    /// Every fixed id. A node inside any of these belongs to the inspector.
    pub const ALL: &[&str] = &[
        ROOT,
        SHADOW_ROOT,
        TOGGLE_BUTTON,
        HOVER_HIGHLIGHT,
        SELECTED_HIGHLIGHT,
        ELEMENT_INFO,
    ];

    /// Guide line of a highlight overlay, e.g. `...-hover-highlight-overlay-top-guide`.
    pub fn guide_line(overlay: &str, side: Side) -> String {
        format!("{}-{}-guide", overlay, side.name())
    }

    /// Dashed spacing line for one side.
    pub fn spacing_line(side: Side) -> String {
        format!("{}-{}-line", SELECTED_HIGHLIGHT, side.name())
    }

    /// Pixel label for one side.
    pub fn spacing_label(side: Side) -> String {
        format!("{}-{}-distance", SELECTED_HIGHLIGHT, side.name())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Stacking order of the injected nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZIndexLayers {
    pub toggle_button: i32,
    pub selected_highlight: i32,
    pub hover_highlight: i32,
    pub info_panel: i32,
    pub guide_lines: i32,
    pub spacing_lines: i32,
    pub spacing_labels: i32,
}

impl Default for ZIndexLayers {
    fn default() -> Self {
        Self {
            toggle_button: 99991,
            selected_highlight: 99992,
            hover_highlight: 99993,
            info_panel: 99994,
            guide_lines: 99995,
            spacing_lines: 99996,
            spacing_labels: 99997,
        }
    }
}

impl ZIndexLayers {
    /// Layers from bottom to top.
    pub fn as_array(&self) -> [i32; 7] {
        [
            self.toggle_button,
            self.selected_highlight,
            self.hover_highlight,
            self.info_panel,
            self.guide_lines,
            self.spacing_lines,
            self.spacing_labels,
        ]
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn color(self) -> Color {
        self.into()
    }

    /// CSS `rgba()` text for inline styles.
    pub fn css(self) -> String {
        css_color(self.color())
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Format a color as a CSS `rgba()` value.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    let alpha = f64::from(rgba.a) / 255.0;
    format!("rgba({}, {}, {}, {})", rgba.r, rgba.g, rgba.b, (alpha * 100.0).round() / 100.0)
}

/// Colors of the injected overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayTheme {
    pub hover_border: SerializableColor,
    pub hover_fill: SerializableColor,
    pub selected_border: SerializableColor,
    pub selected_fill: SerializableColor,
    pub spacing_line: SerializableColor,
    pub spacing_label_background: SerializableColor,
    pub spacing_label_text: SerializableColor,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        let blue = Color::from_rgba8(59, 130, 246, 255);
        let orange = Color::from_rgba8(249, 115, 22, 255);
        Self {
            hover_border: blue.into(),
            hover_fill: blue.with_alpha(0.15).into(),
            selected_border: orange.into(),
            selected_fill: orange.with_alpha(0.15).into(),
            spacing_line: orange.into(),
            spacing_label_background: orange.into(),
            spacing_label_text: Color::WHITE.into(),
        }
    }
}

/// Label offset from the midpoint of a vertical spacing line.
pub const VERTICAL_LABEL_OFFSET: Vec2 = Vec2::new(10.0, -10.0);
/// Label offset from the midpoint of a horizontal spacing line.
pub const HORIZONTAL_LABEL_OFFSET: Vec2 = Vec2::new(-20.0, -25.0);

/// Where a spacing label is drawn relative to its anchor.
pub fn label_offset(side: Side) -> Vec2 {
    if side.is_vertical() {
        VERTICAL_LABEL_OFFSET
    } else {
        HORIZONTAL_LABEL_OFFSET
    }
}

/// Inspector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub panel_width: f64,
    pub panel_height: f64,
    /// Gap between the cursor and the info panel.
    pub cursor_offset: f64,
    /// How long the copy button shows its "copied" state.
    pub copy_feedback_ms: u64,
    /// Show only properties the page author wrote.
    pub authored_only: bool,
    pub hover_guides: bool,
    pub selection_guides: bool,
    pub spacing_indicators: bool,
    /// Initial visibility of the floating toggle button.
    pub button_visible: bool,
    pub theme: OverlayTheme,
    pub z_index: ZIndexLayers,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            panel_width: 300.0,
            panel_height: 400.0,
            cursor_offset: 15.0,
            copy_feedback_ms: 1500,
            authored_only: false,
            hover_guides: true,
            selection_guides: true,
            spacing_indicators: true,
            button_visible: false,
            theme: OverlayTheme::default(),
            z_index: ZIndexLayers::default(),
        }
    }
}

impl ScanConfig {
    /// Parse a config, filling anything missing with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn panel_layout(&self) -> PanelLayout {
        PanelLayout {
            size: Size::new(self.panel_width, self.panel_height),
            cursor_offset: self.cursor_offset,
        }
    }
}
