//! Overlay nodes injected into the page and kept in sync with each frame.

use stylescan_core::config::element_id;
use stylescan_core::overlay::{Highlight, OverlayFrame, Side};
use stylescan_core::{ScanConfig, SerializableColor};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ShadowRootInit, ShadowRootMode};

use crate::error::{WebError, WebResult};
use crate::style_text::{self, HIDDEN};

/// Set the inline style of an overlay node.
pub(crate) fn set_style(element: &HtmlElement, style: &str) {
    if let Err(e) = element.set_attribute("style", style) {
        log::warn!("Failed to style #{}: {:?}", element.id(), e);
    }
}

pub(crate) fn create(document: &Document, tag: &str, id: Option<&str>) -> WebResult<HtmlElement> {
    let element = document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WebError::Unavailable("HTMLElement"))?;
    if let Some(id) = id {
        element.set_id(id);
    }
    Ok(element)
}

/// A highlight box plus its four guides.
struct HighlightNodes {
    frame: HtmlElement,
    guides: Vec<HtmlElement>,
}

impl HighlightNodes {
    fn mount(document: &Document, parent: &HtmlElement, id: &str) -> WebResult<Self> {
        let frame = create(document, "div", Some(id))?;
        set_style(&frame, HIDDEN);
        parent.append_child(&frame)?;

        let mut guides = Vec::with_capacity(4);
        for side in Side::ALL {
            let guide = create(document, "div", Some(&element_id::guide_line(id, side)))?;
            set_style(&guide, HIDDEN);
            parent.append_child(&guide)?;
            guides.push(guide);
        }
        Ok(Self { frame, guides })
    }

    fn apply(
        &self,
        highlight: Option<&Highlight>,
        border: SerializableColor,
        fill: SerializableColor,
        z_index: i32,
        guide_z_index: i32,
    ) {
        let Some(highlight) = highlight else {
            set_style(&self.frame, HIDDEN);
            self.guides.iter().for_each(|g| set_style(g, HIDDEN));
            return;
        };
        set_style(&self.frame, &style_text::highlight_style(highlight.rect, border, fill, z_index));

        match highlight.guides {
            // Side::ALL order matches GuideLines::as_array.
            Some(lines) => {
                for (node, rect) in self.guides.iter().zip(lines.as_array()) {
                    set_style(node, &style_text::guide_style(rect, border, guide_z_index));
                }
            }
            None => self.guides.iter().for_each(|g| set_style(g, HIDDEN)),
        }
    }
}

/// Every node the inspector owns in the page.
pub struct OverlayNodes {
    toggle_button: HtmlElement,
    hover: HighlightNodes,
    selection: HighlightNodes,
    spacing_lines: Vec<(Side, HtmlElement)>,
    spacing_labels: Vec<(Side, HtmlElement)>,
    panel: HtmlElement,
}

impl OverlayNodes {
    /// Create the scan root under `<body>` with an open shadow root holding
    /// the overlays, so page styles do not leak in.
    pub fn mount(document: &Document) -> WebResult<Self> {
        let body = document.body().ok_or(WebError::Unavailable("document.body"))?;
        let host = create(document, "div", Some(element_id::ROOT))?;
        body.append_child(&host)?;

        let shadow = host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?;
        let container = create(document, "div", Some(element_id::SHADOW_ROOT))?;
        shadow.append_child(&container)?;

        let stylesheet = create(document, "style", None)?;
        stylesheet.set_text_content(Some(crate::panel::PANEL_CSS));
        container.append_child(&stylesheet)?;

        let toggle_button = create(document, "button", Some(element_id::TOGGLE_BUTTON))?;
        set_style(&toggle_button, HIDDEN);
        container.append_child(&toggle_button)?;

        let selection = HighlightNodes::mount(document, &container, element_id::SELECTED_HIGHLIGHT)?;
        let hover = HighlightNodes::mount(document, &container, element_id::HOVER_HIGHLIGHT)?;

        let mut spacing_lines = Vec::with_capacity(4);
        let mut spacing_labels = Vec::with_capacity(4);
        for side in Side::ALL {
            let line = create(document, "div", Some(&element_id::spacing_line(side)))?;
            let label = create(document, "div", Some(&element_id::spacing_label(side)))?;
            set_style(&line, HIDDEN);
            set_style(&label, HIDDEN);
            container.append_child(&line)?;
            container.append_child(&label)?;
            spacing_lines.push((side, line));
            spacing_labels.push((side, label));
        }

        let panel = create(document, "div", Some(element_id::ELEMENT_INFO))?;
        set_style(&panel, HIDDEN);
        container.append_child(&panel)?;

        log::debug!("Mounted overlay nodes");
        Ok(Self {
            toggle_button,
            hover,
            selection,
            spacing_lines,
            spacing_labels,
            panel,
        })
    }

    pub fn toggle_button(&self) -> &HtmlElement {
        &self.toggle_button
    }

    pub fn panel(&self) -> &HtmlElement {
        &self.panel
    }

    pub fn update_toggle_button(&self, active: bool, visible: bool, config: &ScanConfig) {
        set_style(
            &self.toggle_button,
            &style_text::toggle_button_style(active, visible, config.z_index.toggle_button),
        );
        let label = if active { "Element Scan: On" } else { "Element Scan: Off" };
        self.toggle_button.set_text_content(Some(label));
    }

    /// Position every overlay for `frame`; anything absent is hidden.
    pub fn apply(&self, frame: &OverlayFrame, config: &ScanConfig) {
        let theme = &config.theme;
        let z = &config.z_index;

        self.selection.apply(
            frame.selection.as_ref(),
            theme.selected_border,
            theme.selected_fill,
            z.selected_highlight,
            z.guide_lines,
        );
        self.hover.apply(
            frame.hover.as_ref(),
            theme.hover_border,
            theme.hover_fill,
            z.hover_highlight,
            z.guide_lines,
        );

        for ((side, line), (_, label)) in self.spacing_lines.iter().zip(&self.spacing_labels) {
            match frame.spacing_on(*side) {
                Some(indicator) => {
                    set_style(line, &style_text::spacing_line_style(indicator, theme.spacing_line, z.spacing_lines));
                    set_style(
                        label,
                        &style_text::spacing_label_style(
                            indicator,
                            theme.spacing_label_background,
                            theme.spacing_label_text,
                            z.spacing_labels,
                        ),
                    );
                    label.set_text_content(Some(&style_text::spacing_label_text(indicator)));
                }
                None => {
                    set_style(line, HIDDEN);
                    set_style(label, HIDDEN);
                }
            }
        }
    }
}
