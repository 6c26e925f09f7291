//! Draws a [`PanelView`] into the info panel node.

use kurbo::Point;
use stylescan_core::ScanConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

use crate::error::WebResult;
use crate::overlay_dom::{create, set_style};
use crate::panel_view::{self, PanelAction, PanelView, action};
use crate::style_text::{self, HIDDEN};

/// Stylesheet injected next to the overlays inside the shadow root.
pub const PANEL_CSS: &str = r#"
.header { padding: 12px 12px 8px; border-bottom: 1px solid #f3f4f6; }
.title { margin: 0; font-weight: 600; font-size: 13px; color: #2563eb; }
.size { margin-top: 2px; color: #6b7280; }
.content { flex: 1; overflow-y: auto; padding: 4px 12px 48px; }
.message { color: #6b7280; padding: 8px 0; }
.group-name { margin: 10px 0 4px; font-weight: 600; color: #374151; text-transform: uppercase; font-size: 11px; }
.row { display: flex; gap: 8px; padding: 2px 0; }
.property { flex: 0 0 45%; color: #9333ea; overflow: hidden; text-overflow: ellipsis; }
.value { flex: 1; display: flex; align-items: center; gap: 4px; cursor: text; word-break: break-all; }
.swatch { flex: 0 0 auto; width: 10px; height: 10px; border: 1px solid #d1d5db; border-radius: 2px; }
.value-input { width: 100%; font: inherit; padding: 0 2px; border: 1px solid #3b82f6; border-radius: 2px; }
.actions { position: absolute; right: 8px; bottom: 8px; display: flex; gap: 4px; }
.actions button { font: 12px sans-serif; padding: 4px 8px; border: 1px solid #e5e7eb; border-radius: 4px; background: #ffffff; cursor: pointer; }
"#;

pub struct PanelRenderer {
    document: Document,
    element: HtmlElement,
    rendered: Option<PanelView>,
}

impl PanelRenderer {
    pub fn new(document: Document, element: HtmlElement) -> Self {
        Self {
            document,
            element,
            rendered: None,
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Show `view` at `position`, or hide the panel when there is none.
    ///
    /// The contents are only rebuilt when the view changed, so an open
    /// editor keeps its focus across re-renders.
    pub fn render(&mut self, view: PanelView, position: Option<Point>, config: &ScanConfig) {
        let Some(position) = position else {
            set_style(&self.element, HIDDEN);
            return;
        };
        set_style(
            &self.element,
            &style_text::panel_style(position, &config.panel_layout(), config.z_index.info_panel),
        );

        if self.rendered.as_ref() == Some(&view) {
            return;
        }
        if let Err(e) = self.rebuild(&view) {
            log::warn!("Failed to render element info: {}", e);
        }
        self.rendered = Some(view);
        self.focus_editor();
    }

    fn rebuild(&self, view: &PanelView) -> WebResult<()> {
        self.element.set_inner_html("");

        let header = self.node("div", "header")?;
        let title = self.node("p", "title")?;
        title.set_text_content(view.title.as_deref());
        header.append_child(&title)?;
        if view.title.is_some() {
            let size = self.node("div", "size")?;
            size.set_text_content(Some(&view.size_label));
            header.append_child(&size)?;
        }
        self.element.append_child(&header)?;

        let content = self.node("div", "content")?;
        if let Some(message) = view.message {
            let note = self.node("div", "message")?;
            note.set_text_content(Some(message));
            content.append_child(&note)?;
        }
        for group in &view.groups {
            let name = self.node("div", "group-name")?;
            name.set_text_content(Some(group.name.name()));
            content.append_child(&name)?;

            for row in &group.rows {
                let line = self.node("div", "row")?;
                let property = self.node("span", "property")?;
                property.set_text_content(Some(&row.property));
                line.append_child(&property)?;

                let value = self.node("div", "value")?;
                value.set_attribute("data-action", action::EDIT)?;
                value.set_attribute("data-group", group.name.name())?;
                value.set_attribute("data-property", &row.property)?;
                if row.editing {
                    let input = self.node("input", "value-input")?;
                    input.set_attribute("type", "text")?;
                    input.set_attribute("value", &row.value)?;
                    value.append_child(&input)?;
                } else {
                    if let Some(swatch) = &row.swatch {
                        let chip = self.node("span", "swatch")?;
                        set_style(&chip, &format!("background-color: {};", swatch));
                        value.append_child(&chip)?;
                    }
                    let text = self.node("span", "value-text")?;
                    text.set_text_content(Some(&row.value));
                    value.append_child(&text)?;
                }
                line.append_child(&value)?;
                content.append_child(&line)?;
            }
        }
        self.element.append_child(&content)?;

        if view.title.is_some() {
            let actions = self.node("div", "actions")?;
            for (name, label) in [
                (action::PASTE, "Paste CSS"),
                (action::COPY, view.copy_title()),
                (action::PIN, view.pin_title()),
            ] {
                let button = self.node("button", "action")?;
                button.set_attribute("data-action", name)?;
                button.set_attribute("title", label)?;
                button.set_text_content(Some(label));
                actions.append_child(&button)?;
            }
            self.element.append_child(&actions)?;
        }
        Ok(())
    }

    fn node(&self, tag: &str, class: &str) -> WebResult<HtmlElement> {
        let element = create(&self.document, tag, None)?;
        element.set_class_name(class);
        Ok(element)
    }

    /// Put the caret at the end of the open editor, if any.
    fn focus_editor(&self) {
        let Ok(Some(input)) = self.element.query_selector(".value-input") else {
            return;
        };
        let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
            return;
        };
        if let Err(e) = input.focus() {
            log::debug!("Failed to focus editor: {:?}", e);
        }
        let end = panel_view::caret_end(&input.value());
        if let Err(e) = input.set_selection_range(end, end) {
            log::debug!("Failed to move editor caret: {:?}", e);
        }
    }
}

/// Decode the panel action of the node an event landed on.
pub fn action_for(event: &Event) -> Option<PanelAction> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let node = target.closest("[data-action]").ok()??;
    let name = node.get_attribute("data-action")?;
    PanelAction::from_attributes(
        &name,
        node.get_attribute("data-group").as_deref(),
        node.get_attribute("data-property").as_deref(),
    )
}

/// Current text of the editor an `input` event came from.
pub fn input_value(event: &Event) -> Option<String> {
    event
        .target()?
        .dyn_into::<HtmlInputElement>()
        .ok()
        .map(|input| input.value())
}
