//! Style extraction: resolved styles in, filtered and grouped declarations out.

use super::{ElementInfo, StyleGroup, StyleGroupName, StyleMap};
use crate::color;
use crate::dom::ElementHandle;

/// Property name prefixes that are never shown.
pub const VENDOR_PREFIXES: &[&str] = &["webkit-", "moz-", "ms-", "o-"];

/// Values that carry no information for a human reader.
///
/// Stored in comparison form: lowercase with whitespace removed.
pub const NOISE_VALUES: &[&str] = &[
    "auto",
    "initial",
    "unset",
    "none",
    "transparent",
    "currentcolor",
    "inherit",
    "static",
    "normal",
    "rgba(0,0,0,0)",
    // Fully transparent black once normalized to hex.
    "#00000000",
];

/// Properties whose four longhands collapse into one shorthand.
pub const BOX_MODEL_PROPERTIES: &[&str] = &["margin", "padding"];

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Extraction policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleExtractor {
    /// Only keep properties the page author actually wrote (inline or in a
    /// matching stylesheet rule) instead of everything the engine resolves.
    pub authored_only: bool,
}

impl StyleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authored_only(mut self, authored_only: bool) -> Self {
        self.authored_only = authored_only;
        self
    }

    /// Build an [`ElementInfo`] for `element`.
    ///
    /// Returns `None` for a missing or detached element.
    pub fn extract<E: ElementHandle>(&self, element: Option<&E>) -> Option<ElementInfo> {
        let element = element?;
        if !element.is_connected() {
            log::debug!("Skipping extraction of detached <{}>", element.tag_name().to_lowercase());
            return None;
        }

        let mut styles = collect_styles(element);
        merge_box_model(&mut styles, BOX_MODEL_PROPERTIES);

        let mut groups = categorize_styles(&styles);
        if self.authored_only {
            let authored = element.authored_properties();
            for group in &mut groups {
                group.styles = group
                    .styles
                    .iter()
                    .filter(|(property, _)| is_authored(property, &authored))
                    .collect();
            }
            groups.retain(|g| !g.styles.is_empty());
        }

        let size = element.offset_size();
        let class_name = element.class_name();
        Some(ElementInfo {
            tag_name: element.tag_name().to_lowercase(),
            class_name: class_name.split_whitespace().next().unwrap_or_default().to_string(),
            width: size.width,
            height: size.height,
            style_groups: groups,
        })
    }
}

/// Extract with the default policy.
pub fn extract<E: ElementHandle>(element: Option<&E>) -> Option<ElementInfo> {
    StyleExtractor::default().extract(element)
}

/// Computed declarations overlaid with inline ones; empty values dropped.
pub fn collect_styles<E: ElementHandle>(element: &E) -> StyleMap {
    let mut styles = StyleMap::new();
    let computed = element.computed_declarations();
    let inline = element.inline_declarations();
    // Inline last so it wins over the computed value of the same name.
    for (property, value) in computed.into_iter().chain(inline) {
        if !value.is_empty() {
            styles.insert(property, value);
        }
    }
    styles
}

/// Collapse `<p>-top/-right/-bottom/-left` into a `<p>` shorthand.
pub fn merge_box_model(styles: &mut StyleMap, properties: &[&str]) {
    for property in properties {
        let longhands: Vec<String> = SIDES.iter().map(|side| format!("{}-{}", property, side)).collect();
        if !longhands.iter().any(|l| styles.contains(l)) {
            continue;
        }
        let values: Vec<String> = longhands
            .iter()
            .map(|l| styles.remove(l).unwrap_or_else(|| "0px".to_string()))
            .collect();
        styles.insert(*property, values.join(" "));
    }
}

/// Sort whitelisted declarations into groups, dropping noise.
pub fn categorize_styles(styles: &StyleMap) -> Vec<StyleGroup> {
    StyleGroupName::ALL
        .into_iter()
        .map(|name| {
            let mut group = StyleGroup::new(name);
            for property in name.properties() {
                let Some(value) = styles.get(property) else {
                    continue;
                };
                if let Some(value) = display_value(property, value) {
                    group.styles.insert(*property, value);
                }
            }
            group
        })
        .filter(|g| !g.styles.is_empty())
        .collect()
}

/// The value shown for a declaration, or `None` when it should be hidden.
pub fn display_value(property: &str, value: &str) -> Option<String> {
    if value.is_empty() || is_vendor_prefixed(property) || is_noise_value(value) {
        return None;
    }
    if !color::is_color_property(property) {
        return Some(value.to_string());
    }
    let normalized = color::to_hex(value);
    (!is_noise_value(&normalized)).then_some(normalized)
}

pub fn is_vendor_prefixed(property: &str) -> bool {
    let name = property.trim_start_matches('-');
    VENDOR_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

pub fn is_noise_value(value: &str) -> bool {
    let key: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    NOISE_VALUES.contains(&key.as_str())
}

fn is_authored(property: &str, authored: &[String]) -> bool {
    let longhand_prefix = format!("{}-", property);
    authored
        .iter()
        .any(|a| a == property || a.starts_with(&longhand_prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryElement;
    use kurbo::Rect;

    fn card() -> MemoryElement {
        MemoryElement::new("DIV")
            .with_class("card  primary")
            .with_rect(Rect::new(10.0, 20.0, 130.0, 68.0))
            .with_computed("display", "block")
            .with_computed("width", "120px")
            .with_computed("height", "48px")
            .with_computed("position", "static")
            .with_computed("top", "auto")
            .with_computed("color", "rgb(255, 255, 255)")
            .with_computed("background-color", "rgba(0, 0, 0, 0)")
            .with_computed("font-weight", "400")
            .with_computed("letter-spacing", "normal")
            .with_computed("-webkit-box-flex", "1")
            .with_computed("margin-top", "4px")
            .with_computed("margin-right", "0px")
            .with_computed("margin-bottom", "4px")
            .with_computed("margin-left", "0px")
            .with_computed("transition", "all 0s ease 0s")
    }

    fn all_declarations(info: &ElementInfo) -> Vec<(String, String)> {
        info.style_groups
            .iter()
            .flat_map(|g| g.styles.iter().map(|(p, v)| (p.to_string(), v.to_string())))
            .collect()
    }

    #[test]
    fn test_extract_none_for_missing() {
        assert_eq!(extract::<MemoryElement>(None), None);
    }

    #[test]
    fn test_extract_none_for_detached() {
        let el = card();
        el.detach();
        assert_eq!(extract(Some(&el)), None);
    }

    #[test]
    fn test_extract_header_fields() {
        let info = extract(Some(&card())).unwrap();
        assert_eq!(info.tag_name, "div");
        assert_eq!(info.class_name, "card");
        assert!((info.width - 120.0).abs() < f64::EPSILON);
        assert!((info.height - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_filters_noise_and_prefixes() {
        let info = extract(Some(&card())).unwrap();
        for (property, value) in all_declarations(&info) {
            assert!(!is_noise_value(&value), "{}: {}", property, value);
            assert!(!is_vendor_prefixed(&property), "{}", property);
        }
        let layout = info.group(StyleGroupName::Layout).unwrap();
        assert!(!layout.styles.contains("position"));
        assert!(!layout.styles.contains("top"));
        assert!(info.group(StyleGroupName::Appearance).is_none());
    }

    #[test]
    fn test_extract_hides_every_noise_value_on_every_property() {
        let properties: Vec<&str> = StyleGroupName::ALL.iter().flat_map(|g| g.properties()).copied().collect();
        for noise in NOISE_VALUES {
            for written in [noise.to_string(), noise.to_uppercase(), format!(" {} ", noise.replace(',', ", "))] {
                let el = properties
                    .iter()
                    .fold(MemoryElement::new("span"), |el, property| el.with_computed(property, &written));
                let info = extract(Some(&el)).unwrap();
                assert!(info.style_groups.is_empty(), "{:?}: {:?}", written, all_declarations(&info));
            }
        }
    }

    #[test]
    fn test_extract_hides_every_vendor_prefix() {
        let properties: Vec<&str> = StyleGroupName::ALL.iter().flat_map(|g| g.properties()).copied().collect();
        for prefix in VENDOR_PREFIXES {
            for dash in ["-", ""] {
                let el = properties.iter().fold(MemoryElement::new("p"), |el, property| {
                    el.with_computed(&format!("{}{}{}", dash, prefix, property), "3px")
                });
                let info = extract(Some(&el)).unwrap();
                assert!(info.style_groups.is_empty(), "{}{}", dash, prefix);

                for property in &properties {
                    let prefixed = format!("{}{}{}", dash, prefix, property);
                    assert!(is_vendor_prefixed(&prefixed), "{}", prefixed);
                    assert_eq!(display_value(&prefixed, "3px"), None);
                    assert_eq!(display_value(property, "3px").as_deref(), Some("3px"));
                }
            }
        }
    }

    #[test]
    fn test_extract_groups_in_order() {
        let info = extract(Some(&card())).unwrap();
        let names: Vec<_> = info.style_groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec![StyleGroupName::Layout, StyleGroupName::Typography]);

        let layout: Vec<_> = info.style_groups[0].styles.iter().map(|(p, _)| p).collect();
        assert_eq!(layout, vec!["width", "height", "display", "margin"]);
    }

    #[test]
    fn test_extract_normalizes_colors() {
        let info = extract(Some(&card())).unwrap();
        let typography = info.group(StyleGroupName::Typography).unwrap();
        assert_eq!(typography.styles.get("color"), Some("#ffffff"));
    }

    #[test]
    fn test_extract_drops_non_whitelisted() {
        let info = extract(Some(&card())).unwrap();
        assert!(all_declarations(&info).iter().all(|(p, _)| p != "transition"));
    }

    #[test]
    fn test_inline_wins_over_computed() {
        let el = card().with_inline("width", "50%");
        let info = extract(Some(&el)).unwrap();
        assert_eq!(info.group(StyleGroupName::Layout).unwrap().styles.get("width"), Some("50%"));
    }

    #[test]
    fn test_merge_box_model_fills_missing_sides() {
        let mut styles: StyleMap = [("margin-top", "1px"), ("margin-left", "2px")].into_iter().collect();
        merge_box_model(&mut styles, BOX_MODEL_PROPERTIES);
        assert_eq!(styles.get("margin"), Some("1px 0px 0px 2px"));
        assert!(!styles.contains("margin-top"));
        assert!(!styles.contains("margin-left"));
        assert!(!styles.contains("padding"));
    }

    #[test]
    fn test_merge_box_model_all_sides() {
        let mut styles: StyleMap = [
            ("padding-top", "1px"),
            ("padding-right", "2px"),
            ("padding-bottom", "3px"),
            ("padding-left", "4px"),
        ]
        .into_iter()
        .collect();
        merge_box_model(&mut styles, BOX_MODEL_PROPERTIES);
        assert_eq!(styles.get("padding"), Some("1px 2px 3px 4px"));
        assert_eq!(styles.len(), 1);
    }

    #[test]
    fn test_display_value_rules() {
        assert_eq!(display_value("width", "auto"), None);
        assert_eq!(display_value("color", "currentColor"), None);
        assert_eq!(display_value("background-color", "rgba(0,0,0,0)"), None);
        assert_eq!(display_value("background-color", "rgba(0, 0, 0, 0.0)"), None);
        assert_eq!(display_value("-moz-appearance", "button"), None);
        assert_eq!(display_value("background-color", "rgba(255, 0, 0, 0.5)").as_deref(), Some("#ff000080"));
        assert_eq!(display_value("border", "1px solid rgb(0, 0, 0)").as_deref(), Some("1px solid rgb(0, 0, 0)"));
    }

    #[test]
    fn test_vendor_prefix_detection() {
        assert!(is_vendor_prefixed("-webkit-line-clamp"));
        assert!(is_vendor_prefixed("ms-filter"));
        assert!(!is_vendor_prefixed("opacity"));
        assert!(!is_vendor_prefixed("overflow"));
    }

    #[test]
    fn test_authored_only() {
        let el = card().with_authored("color").with_authored("margin-top");
        let info = StyleExtractor::new().authored_only(true).extract(Some(&el)).unwrap();
        let declarations = all_declarations(&info);
        let properties: Vec<_> = declarations.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(properties, vec!["margin", "color"]);
    }
}
