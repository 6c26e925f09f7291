//! `ElementHandle` over live `web-sys` elements.

use kurbo::{Rect, Size};
use stylescan_core::dom::{Declaration, DomError, DomResult, ElementHandle};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, CssStyleRule, CssStyleSheet, Element, HtmlElement};

/// Handle to a page element. Equality is node identity.
#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(pub Element);

impl WebElement {
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    /// Wrap an event target if it is an element.
    pub fn from_target(target: Option<web_sys::EventTarget>) -> Option<Self> {
        target?.dyn_into::<Element>().ok().map(Self)
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }

    fn inline_style(&self) -> DomResult<CssStyleDeclaration> {
        self.html()
            .map(|el| el.style())
            .ok_or_else(|| DomError::Unavailable(format!("<{}> has no inline style", self.0.tag_name())))
    }

    /// Property names of every stylesheet rule that matches this element.
    ///
    /// Cross-origin sheets refuse `cssRules` and are skipped.
    fn matched_rule_properties(&self) -> Vec<String> {
        let mut properties = Vec::new();
        let Some(document) = self.0.owner_document() else {
            return properties;
        };
        let sheets = document.style_sheets();
        for i in 0..sheets.length() {
            let Some(sheet) = sheets.item(i).and_then(|s| s.dyn_into::<CssStyleSheet>().ok()) else {
                continue;
            };
            let rules = match sheet.css_rules() {
                Ok(rules) => rules,
                Err(e) => {
                    log::debug!("Skipping unreadable stylesheet {:?}: {:?}", sheet.href().ok().flatten(), e);
                    continue;
                }
            };
            for j in 0..rules.length() {
                let Some(rule) = rules.item(j).and_then(|r| r.dyn_into::<CssStyleRule>().ok()) else {
                    continue;
                };
                if self.0.matches(&rule.selector_text()).unwrap_or(false) {
                    properties.extend(declaration_names(&rule.style()));
                }
            }
        }
        properties
    }
}

fn declaration_names(style: &CssStyleDeclaration) -> Vec<String> {
    (0..style.length()).map(|i| style.item(i)).filter(|p| !p.is_empty()).collect()
}

fn declarations(style: &CssStyleDeclaration) -> Vec<Declaration> {
    declaration_names(style)
        .into_iter()
        .filter_map(|property| {
            let value = style.get_property_value(&property).ok()?;
            Some((property, value))
        })
        .collect()
}

impl ElementHandle for WebElement {
    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn id(&self) -> String {
        self.0.id()
    }

    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn class_name(&self) -> String {
        // `className` is an SVGAnimatedString on SVG elements; the attribute is always text.
        self.0.get_attribute("class").unwrap_or_default()
    }

    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn offset_size(&self) -> Size {
        match self.html() {
            Some(el) => Size::new(f64::from(el.offset_width()), f64::from(el.offset_height())),
            None => self.bounding_rect().size(),
        }
    }

    fn computed_declarations(&self) -> Vec<Declaration> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        match window.get_computed_style(&self.0) {
            Ok(Some(style)) => declarations(&style),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("getComputedStyle failed: {:?}", e);
                Vec::new()
            }
        }
    }

    fn inline_declarations(&self) -> Vec<Declaration> {
        self.inline_style().map(|s| declarations(&s)).unwrap_or_default()
    }

    fn authored_properties(&self) -> Vec<String> {
        let mut properties: Vec<String> = self
            .inline_style()
            .map(|s| declaration_names(&s))
            .unwrap_or_default();
        for property in self.matched_rule_properties() {
            if !properties.contains(&property) {
                properties.push(property);
            }
        }
        properties
    }

    fn contains(&self, other: &Self) -> bool {
        self.0.contains(Some(other.0.as_ref()))
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }

    fn set_style_property(&self, property: &str, value: &str) -> DomResult<()> {
        if !self.is_connected() {
            return Err(DomError::Detached);
        }
        let style = self.inline_style()?;
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        result.map_err(|_| DomError::StyleRejected {
            property: property.to_string(),
            value: value.to_string(),
        })
    }

    fn style_property(&self, property: &str) -> Option<String> {
        let value = self.inline_style().ok()?.get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }
}
