//! What the info panel shows, independent of how it is drawn.

use stylescan_core::color;
use stylescan_core::{ElementInfo, StyleEditor, StyleGroupName};

/// Message shown when the element has no displayable styles.
pub const NO_STYLES: &str = "No styles extracted.";
/// Message shown when nothing is being inspected.
pub const NO_ELEMENT: &str = "No element information.";

/// One declaration row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub property: String,
    pub value: String,
    /// Color to paint in the swatch next to color values.
    pub swatch: Option<String>,
    /// The row shows a text input instead of the value.
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelGroup {
    pub name: StyleGroupName,
    pub rows: Vec<PanelRow>,
}

/// Complete panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// `tag.class` header, `None` without an element.
    pub title: Option<String>,
    pub size_label: String,
    pub groups: Vec<PanelGroup>,
    pub message: Option<&'static str>,
    pub copied: bool,
    pub pinned: bool,
}

impl PanelView {
    pub fn build(info: Option<&ElementInfo>, editor: &StyleEditor, copied: bool, pinned: bool) -> Self {
        let Some(info) = info else {
            return Self {
                title: None,
                size_label: String::new(),
                groups: Vec::new(),
                message: Some(NO_ELEMENT),
                copied,
                pinned,
            };
        };

        let groups: Vec<PanelGroup> = info
            .style_groups
            .iter()
            .map(|group| PanelGroup {
                name: group.name,
                rows: group
                    .styles
                    .iter()
                    .map(|(property, value)| {
                        let editing = editor.is_editing_property(group.name, property);
                        let value = match editor.session() {
                            Some(session) if editing => session.value.clone(),
                            _ => value.to_string(),
                        };
                        PanelRow {
                            swatch: swatch_for(property, &value),
                            property: property.to_string(),
                            value,
                            editing,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: Some(info.label()),
            size_label: info.size_label(),
            message: groups.is_empty().then_some(NO_STYLES),
            groups,
            copied,
            pinned,
        }
    }

    pub fn copy_title(&self) -> &'static str {
        if self.copied { "Copied!" } else { "Copy CSS" }
    }

    pub fn pin_title(&self) -> &'static str {
        if self.pinned { "Unpin" } else { "Pin on click" }
    }
}

/// `data-action` values carried by interactive panel nodes.
pub mod action {
    pub const COPY: &str = "copy";
    pub const PASTE: &str = "paste";
    pub const PIN: &str = "pin";
    pub const EDIT: &str = "edit";
}

/// A user gesture inside the panel, decoded from the `data-*` attributes of
/// the node it landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    CopyCss,
    PasteCss,
    TogglePin,
    BeginEdit { group: StyleGroupName, property: String },
}

impl PanelAction {
    pub fn from_attributes(action: &str, group: Option<&str>, property: Option<&str>) -> Option<Self> {
        match action {
            action::COPY => Some(Self::CopyCss),
            action::PASTE => Some(Self::PasteCss),
            action::PIN => Some(Self::TogglePin),
            action::EDIT => {
                let group = StyleGroupName::from_name(group?)?;
                Some(Self::BeginEdit {
                    group,
                    property: property?.to_string(),
                })
            }
            other => {
                log::debug!("Unknown panel action: {}", other);
                None
            }
        }
    }
}

/// Caret offset just past the end of an editor value, in UTF-16 units as
/// the DOM selection API counts them.
pub fn caret_end(value: &str) -> u32 {
    u32::try_from(value.encode_utf16().count()).unwrap_or(u32::MAX)
}

fn swatch_for(property: &str, value: &str) -> Option<String> {
    if !color::is_color_property(property) {
        return None;
    }
    color::extract_color(value).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylescan_core::StyleGroup;

    fn info() -> ElementInfo {
        ElementInfo {
            tag_name: "button".to_string(),
            class_name: "primary".to_string(),
            width: 80.4,
            height: 32.0,
            style_groups: vec![
                StyleGroup::new(StyleGroupName::Layout).with_style("width", "80px"),
                StyleGroup::new(StyleGroupName::Typography).with_style("color", "#ffffff"),
                StyleGroup::new(StyleGroupName::Appearance).with_style("border", "1px solid #ff0000"),
            ],
        }
    }

    #[test]
    fn test_build_without_element() {
        let view = PanelView::build(None, &StyleEditor::new(), false, false);
        assert_eq!(view.title, None);
        assert_eq!(view.message, Some(NO_ELEMENT));
    }

    #[test]
    fn test_build_header_and_rows() {
        let view = PanelView::build(Some(&info()), &StyleEditor::new(), false, true);
        assert_eq!(view.title.as_deref(), Some("button.primary"));
        assert_eq!(view.size_label, "80 × 32");
        assert_eq!(view.groups.len(), 3);
        assert_eq!(view.message, None);
        assert_eq!(view.pin_title(), "Unpin");
    }

    #[test]
    fn test_swatches_only_on_color_properties() {
        let view = PanelView::build(Some(&info()), &StyleEditor::new(), false, false);
        assert_eq!(view.groups[0].rows[0].swatch, None);
        assert_eq!(view.groups[1].rows[0].swatch.as_deref(), Some("#ffffff"));
        // `border` is not a color property even though its value holds one.
        assert_eq!(view.groups[2].rows[0].swatch, None);
    }

    #[test]
    fn test_editing_row_shows_session_value() {
        let mut editor = StyleEditor::new();
        editor.begin_edit(StyleGroupName::Layout, "width", "80px");
        // Empty input stays visible in the field without being applied.
        editor.update_edit::<stylescan_core::MemoryElement>("", None, None).unwrap();

        let view = PanelView::build(Some(&info()), &editor, false, false);
        let row = &view.groups[0].rows[0];
        assert!(row.editing);
        assert_eq!(row.value, "");
        assert!(!view.groups[1].rows[0].editing);
    }

    #[test]
    fn test_panel_action_from_attributes() {
        assert_eq!(PanelAction::from_attributes("copy", None, None), Some(PanelAction::CopyCss));
        assert_eq!(PanelAction::from_attributes("pin", None, None), Some(PanelAction::TogglePin));
        assert_eq!(
            PanelAction::from_attributes("edit", Some("Typography"), Some("color")),
            Some(PanelAction::BeginEdit {
                group: StyleGroupName::Typography,
                property: "color".to_string(),
            })
        );
        assert_eq!(PanelAction::from_attributes("edit", Some("Nope"), Some("color")), None);
        assert_eq!(PanelAction::from_attributes("edit", Some("Layout"), None), None);
        assert_eq!(PanelAction::from_attributes("explode", None, None), None);
    }

    #[test]
    fn test_empty_groups_message() {
        let mut bare = info();
        bare.style_groups.clear();
        let view = PanelView::build(Some(&bare), &StyleEditor::new(), true, false);
        assert_eq!(view.message, Some(NO_STYLES));
        assert_eq!(view.copy_title(), "Copied!");
    }

    #[test]
    fn test_caret_end_counts_utf16_units() {
        assert_eq!(caret_end(""), 0);
        assert_eq!(caret_end("12px"), 4);
        assert_eq!(caret_end("\"é\""), 3);
        assert_eq!(caret_end("😀 x"), 4);
    }
}
