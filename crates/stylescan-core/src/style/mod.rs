//! Grouped style model produced by extraction and consumed by the panel,
//! the editor and the CSS serializer.

pub mod css;
pub mod extract;

pub use css::{CssDeclaration, parse_declarations, to_css_text, to_css_text_grouped};
pub use extract::{StyleExtractor, extract};

use serde::{Deserialize, Serialize};

/// Semantic bucket of related CSS properties.
///
/// Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleGroupName {
    Layout,
    Typography,
    Appearance,
    Flexbox,
}

impl StyleGroupName {
    /// All groups in display order.
    pub const ALL: [StyleGroupName; 4] = [
        StyleGroupName::Layout,
        StyleGroupName::Typography,
        StyleGroupName::Appearance,
        StyleGroupName::Flexbox,
    ];

    /// Get display name for this group.
    pub fn name(self) -> &'static str {
        match self {
            StyleGroupName::Layout => "Layout",
            StyleGroupName::Typography => "Typography",
            StyleGroupName::Appearance => "Appearance",
            StyleGroupName::Flexbox => "Flexbox",
        }
    }

    /// Properties that belong to this group, in display order.
    ///
    /// The lists are disjoint, so a property lands in exactly one group.
    pub fn properties(self) -> &'static [&'static str] {
        match self {
            StyleGroupName::Layout => &[
                "width", "height", "display", "position", "top", "right", "bottom", "left",
                "margin", "padding", "box-sizing", "overflow",
            ],
            StyleGroupName::Typography => &[
                "font-family", "font-size", "font-weight", "line-height", "letter-spacing",
                "text-align", "color",
            ],
            StyleGroupName::Appearance => &[
                "background-color", "background-image", "opacity", "border", "border-radius",
                "box-shadow", "z-index",
            ],
            StyleGroupName::Flexbox => &[
                "flex", "flex-direction", "flex-wrap", "justify-content", "align-items", "gap",
            ],
        }
    }

    /// Look up a group by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }
}

impl std::fmt::Display for StyleGroupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Insertion-ordered `property -> value` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the original position on replace.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.entries.iter().position(|(p, _)| p == property)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (property, value) in iter {
            map.insert(property, value);
        }
        map
    }
}

/// A named group of declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleGroup {
    pub name: StyleGroupName,
    pub styles: StyleMap,
}

impl StyleGroup {
    pub fn new(name: StyleGroupName) -> Self {
        Self {
            name,
            styles: StyleMap::new(),
        }
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.styles.insert(property, value);
        self
    }
}

/// Summary of one inspected element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub tag_name: String,
    /// First class name, empty when the element has none.
    pub class_name: String,
    pub width: f64,
    pub height: f64,
    pub style_groups: Vec<StyleGroup>,
}

impl ElementInfo {
    /// Header label such as `div.card`.
    pub fn label(&self) -> String {
        if self.class_name.is_empty() {
            self.tag_name.clone()
        } else {
            format!("{}.{}", self.tag_name, self.class_name)
        }
    }

    pub fn group(&self, name: StyleGroupName) -> Option<&StyleGroup> {
        self.style_groups.iter().find(|g| g.name == name)
    }

    /// Return a copy with one declaration replaced.
    ///
    /// Unknown groups leave the info untouched. A property that already lives
    /// in a different group is not duplicated into this one.
    pub fn update_style(&self, group: StyleGroupName, property: &str, value: &str) -> ElementInfo {
        let owned_elsewhere = self
            .style_groups
            .iter()
            .any(|g| g.name != group && g.styles.contains(property));

        let mut next = self.clone();
        if owned_elsewhere {
            return next;
        }
        if let Some(target) = next.style_groups.iter_mut().find(|g| g.name == group) {
            target.styles.insert(property, value);
        }
        next
    }

    /// Size label shown under the header, e.g. `120 × 48`.
    pub fn size_label(&self) -> String {
        format!("{} × {}", self.width.round(), self.height.round())
    }
}
