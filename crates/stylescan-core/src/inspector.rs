//! The inspector: owns interaction state, the style editor and config, and
//! turns page events into state transitions and overlay frames.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use kurbo::Point;

use crate::config::{ScanConfig, element_id};
use crate::dom::{DomError, DomResult, ElementHandle};
use crate::edit::{BulkApplyReport, EditSession, StyleEditor, apply_bulk};
use crate::input::{KeyInput, ScanCommand, ShortcutRegistry};
use crate::overlay::{self, OverlayFrame, Viewport};
use crate::protocol::ExtensionMessage;
use crate::state::{ClickEffect, InteractionState};
use crate::style::{StyleExtractor, StyleGroupName, to_css_text, to_css_text_grouped};

/// What the host should do with a click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    pub effect: ClickEffect,
    /// Call `preventDefault` / `stopPropagation` on the event.
    pub consume: bool,
}

/// Time-limited "copied" indicator for the copy button.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyFeedback {
    started: Option<Instant>,
}

impl CopyFeedback {
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn is_active(&self, now: Instant, duration: Duration) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < duration)
    }
}

/// Composition root of the inspector.
pub struct Inspector<E> {
    state: InteractionState<E>,
    editor: StyleEditor,
    extractor: StyleExtractor,
    config: ScanConfig,
    cursor: Point,
    panel_position: Option<Point>,
    copy_feedback: CopyFeedback,
}

impl<E: ElementHandle> Default for Inspector<E> {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl<E: ElementHandle> Inspector<E> {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            state: InteractionState::new().with_button_visible(config.button_visible),
            editor: StyleEditor::new(),
            extractor: StyleExtractor::new().authored_only(config.authored_only),
            config,
            cursor: Point::ZERO,
            panel_position: None,
            copy_feedback: CopyFeedback::default(),
        }
    }

    pub fn state(&self) -> &InteractionState<E> {
        &self.state
    }

    pub fn editor(&self) -> &StyleEditor {
        &self.editor
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Whether `element` is one of the inspector's own nodes.
    pub fn is_scan_element(&self, element: &E) -> bool {
        element.has_ancestor_with_id(element_id::ALL)
    }

    pub fn toggle_scan(&mut self, value: Option<bool>) -> bool {
        let active = self.state.toggle_scan(value);
        if !active {
            self.editor.commit_edit();
            self.panel_position = None;
        }
        active
    }

    pub fn toggle_pin(&mut self, value: Option<bool>) -> bool {
        self.state.toggle_pin(value)
    }

    pub fn toggle_button_visible(&mut self, value: Option<bool>) -> bool {
        self.state.toggle_button_visible(value)
    }

    pub fn handle_message(&mut self, message: ExtensionMessage) {
        log::debug!("Received {}", message.action());
        match message {
            ExtensionMessage::ToggleElementScan { value } => {
                self.toggle_scan(value);
            }
            ExtensionMessage::ToggleElementScanButtonVisible { value } => {
                self.toggle_button_visible(value);
            }
        }
    }

    /// Returns whether a shortcut was handled.
    pub fn key_down(&mut self, input: &KeyInput) -> bool {
        match ShortcutRegistry::resolve(input) {
            Some(ScanCommand::ToggleScan) => {
                self.toggle_scan(None);
                true
            }
            Some(ScanCommand::StopScan) if self.state.scan_active() => {
                self.toggle_scan(Some(false));
                true
            }
            _ => false,
        }
    }

    pub fn mouse_move(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    /// Pointer entered `target`. Returns whether the hovered element changed.
    pub fn mouse_over(&mut self, target: E) -> bool {
        if !self.state.scan_active() || self.is_scan_element(&target) {
            return false;
        }
        self.set_hovered(Some(target))
    }

    /// Pointer left `target` towards `related`.
    ///
    /// Moving onto the inspector's own UI keeps the hover so the panel stays
    /// usable.
    pub fn mouse_out(&mut self, target: &E, related: Option<&E>) -> bool {
        if !self.state.scan_active() {
            return false;
        }
        if related.is_some_and(|r| self.is_scan_element(r)) {
            return false;
        }
        let changed = self.state.clear_hovered_if(target);
        if changed {
            self.editor.commit_edit();
            self.refresh_info();
        }
        changed
    }

    pub fn click(&mut self, target: E) -> ClickOutcome {
        if !self.state.scan_active() {
            return ClickOutcome {
                effect: ClickEffect::Ignored,
                consume: false,
            };
        }
        // The toggle button and panel live under the scan root and handle
        // their own clicks.
        if self.is_scan_element(&target) {
            return ClickOutcome {
                effect: ClickEffect::Ignored,
                consume: false,
            };
        }

        let effect = self.state.click(target);
        self.refresh_info();
        ClickOutcome {
            effect,
            consume: true,
        }
    }

    /// Host-driven hover change. Returns whether it took effect.
    pub fn set_hovered(&mut self, element: Option<E>) -> bool {
        let changed = self.state.set_hovered(element);
        if changed {
            self.editor.commit_edit();
            self.refresh_info();
        }
        changed
    }

    pub fn set_selected(&mut self, element: Option<E>) {
        self.state.set_selected(element);
        self.refresh_info();
    }

    /// Re-extract the info for the inspected element.
    pub fn refresh_info(&mut self) {
        let info = self.extractor.extract(self.state.inspected());
        self.state.set_element_info(info);
    }

    /// Start editing `property` with its currently displayed value.
    pub fn begin_edit(&mut self, group: StyleGroupName, property: &str) {
        let current = self
            .state
            .element_info()
            .and_then(|info| info.group(group))
            .and_then(|g| g.styles.get(property))
            .unwrap_or_default()
            .to_string();
        self.editor.begin_edit(group, property, &current);
    }

    /// Returns whether the value was applied.
    pub fn update_edit(&mut self, value: &str) -> DomResult<bool> {
        let updated = self
            .editor
            .update_edit(value, self.state.inspected(), self.state.element_info());
        match updated {
            Ok(Some(info)) => {
                self.state.set_element_info(Some(info));
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                log::warn!("Style edit failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn commit_edit(&mut self) -> Option<EditSession> {
        self.editor.commit_edit()
    }

    /// Apply a pasted declaration block to the inspected element.
    pub fn apply_css(&mut self, css_text: &str) -> DomResult<BulkApplyReport> {
        let target = self.state.inspected().cloned().ok_or(DomError::Detached)?;
        let report = apply_bulk(&target, css_text)?;
        self.refresh_info();
        Ok(report)
    }

    /// Flat CSS for the inspected element.
    pub fn css_text(&self) -> Option<String> {
        self.state.element_info().map(|info| to_css_text(&info.style_groups))
    }

    pub fn css_text_grouped(&self) -> Option<String> {
        self.state
            .element_info()
            .map(|info| to_css_text_grouped(&info.style_groups))
    }

    /// Text to put on the clipboard, or `None` while the previous copy is
    /// still showing feedback or there is nothing to copy.
    pub fn copy_css(&mut self) -> Option<String> {
        self.copy_css_at(Instant::now())
    }

    pub fn copy_css_at(&mut self, now: Instant) -> Option<String> {
        if self.copy_feedback_active_at(now) {
            return None;
        }
        let text = self.css_text()?;
        self.copy_feedback.start(now);
        Some(text)
    }

    pub fn copy_feedback_active(&self) -> bool {
        self.copy_feedback_active_at(Instant::now())
    }

    pub fn copy_feedback_active_at(&self, now: Instant) -> bool {
        self.copy_feedback
            .is_active(now, Duration::from_millis(self.config.copy_feedback_ms))
    }

    /// Compute all overlay geometry from live element state.
    pub fn frame(&mut self, viewport: &Viewport) -> OverlayFrame {
        if !self.state.scan_active() {
            return OverlayFrame::default();
        }
        let hovered = self.state.hovered();
        let selected = self.state.selected();

        let hover_guides = self.config.hover_guides && selected.is_none();
        let spacing = if self.config.spacing_indicators {
            overlay::spacing_indicators(selected, hovered, viewport, element_id::ROOT)
        } else {
            Vec::new()
        };

        let panel = match hovered.filter(|h| h.is_connected()) {
            Some(_) => match (self.state.pinned(), self.panel_position) {
                (true, Some(position)) => Some(position),
                _ => Some(overlay::place_panel(
                    self.cursor,
                    viewport.size,
                    &self.config.panel_layout(),
                )),
            },
            None => None,
        };

        let frame = OverlayFrame {
            hover: overlay::highlight(hovered, viewport, hover_guides),
            selection: overlay::highlight(selected, viewport, self.config.selection_guides),
            spacing,
            panel,
        };
        self.panel_position = frame.panel;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryElement;
    use crate::overlay::Side;
    use kurbo::{Rect, Size, Vec2};

    fn viewport() -> Viewport {
        Viewport::new(Vec2::ZERO, Size::new(1000.0, 800.0), 2000.0)
    }

    fn page() -> (MemoryElement, MemoryElement, MemoryElement) {
        let body = MemoryElement::new("body").with_rect(Rect::new(0.0, 0.0, 1000.0, 2000.0));
        let card = MemoryElement::new("div")
            .with_class("card")
            .with_rect(Rect::new(0.0, 0.0, 50.0, 50.0))
            .with_computed("width", "50px")
            .with_computed("color", "rgb(0, 0, 0)");
        let badge = MemoryElement::new("span")
            .with_rect(Rect::new(100.0, 100.0, 150.0, 150.0))
            .with_computed("display", "inline-block");
        body.append_child(&card);
        body.append_child(&badge);
        (body, card, badge)
    }

    fn active() -> Inspector<MemoryElement> {
        let mut inspector = Inspector::default();
        inspector.toggle_scan(Some(true));
        inspector
    }

    #[test]
    fn test_inactive_ignores_events() {
        let (_, card, _) = page();
        let mut inspector = Inspector::<MemoryElement>::default();
        assert!(!inspector.mouse_over(card.clone()));
        assert_eq!(inspector.click(card).effect, ClickEffect::Ignored);
        assert_eq!(inspector.frame(&viewport()), OverlayFrame::default());
    }

    #[test]
    fn test_hover_extracts_info() {
        let (_, card, _) = page();
        let mut inspector = active();
        assert!(inspector.mouse_over(card));
        let info = inspector.state().element_info().unwrap();
        assert_eq!(info.label(), "div.card");
        assert_eq!(inspector.css_text().as_deref(), Some("width: 50px;\ncolor: #000000"));
    }

    #[test]
    fn test_scan_elements_not_hovered() {
        let root = MemoryElement::new("div").with_id(element_id::ROOT);
        let panel_button = MemoryElement::new("button");
        root.append_child(&panel_button);

        let mut inspector = active();
        assert!(inspector.is_scan_element(&panel_button));
        assert!(!inspector.mouse_over(panel_button));
    }

    #[test]
    fn test_mouse_out_onto_panel_keeps_hover() {
        let (_, card, _) = page();
        let root = MemoryElement::new("div").with_id(element_id::ROOT);
        let mut inspector = active();
        inspector.mouse_over(card.clone());

        assert!(!inspector.mouse_out(&card, Some(&root)));
        assert!(inspector.state().hovered().is_some());
        assert!(inspector.mouse_out(&card, None));
        assert!(inspector.state().hovered().is_none());
        assert!(inspector.state().element_info().is_none());
    }

    #[test]
    fn test_click_consumes_page_clicks() {
        let (_, card, _) = page();
        let mut inspector = active();
        inspector.mouse_over(card.clone());
        let outcome = inspector.click(card.clone());
        assert_eq!(outcome, ClickOutcome { effect: ClickEffect::Selected, consume: true });
        assert!(inspector.state().pinned());
        assert_eq!(inspector.state().selected(), Some(&card));
    }

    #[test]
    fn test_click_on_toggle_button_passes_through() {
        let button = MemoryElement::new("button").with_id(element_id::TOGGLE_BUTTON);
        let mut inspector = active();
        let outcome = inspector.click(button);
        assert_eq!(outcome, ClickOutcome { effect: ClickEffect::Ignored, consume: false });
        assert!(inspector.state().selected().is_none());
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut inspector = Inspector::<MemoryElement>::default();
        assert!(!inspector.key_down(&KeyInput::new("Escape")));
        assert!(!inspector.state().scan_active());

        assert!(inspector.key_down(&KeyInput::new("c").with_alt()));
        assert!(inspector.state().scan_active());
        assert!(inspector.key_down(&KeyInput::new("Escape")));
        assert!(!inspector.state().scan_active());
    }

    #[test]
    fn test_messages() {
        let mut inspector = Inspector::<MemoryElement>::default();
        inspector.handle_message(ExtensionMessage::ToggleElementScan { value: None });
        assert!(inspector.state().scan_active());
        inspector.handle_message(ExtensionMessage::ToggleElementScanButtonVisible { value: Some(true) });
        assert!(inspector.state().button_visible());
        inspector.handle_message(ExtensionMessage::ToggleElementScan { value: Some(false) });
        assert!(!inspector.state().scan_active());
    }

    #[test]
    fn test_edit_roundtrip() {
        let (_, card, _) = page();
        let mut inspector = active();
        inspector.mouse_over(card.clone());
        inspector.begin_edit(StyleGroupName::Layout, "width");
        assert_eq!(inspector.editor().session().unwrap().value, "50px");

        assert_eq!(inspector.update_edit("80px"), Ok(true));
        assert_eq!(card.style_property("width").as_deref(), Some("80px"));
        assert_eq!(inspector.css_text().as_deref(), Some("width: 80px;\ncolor: #000000"));
        assert!(inspector.commit_edit().is_some());
    }

    #[test]
    fn test_hover_change_closes_edit() {
        let (_, card, badge) = page();
        let mut inspector = active();
        inspector.mouse_over(card);
        inspector.begin_edit(StyleGroupName::Layout, "width");
        inspector.mouse_over(badge);
        assert!(!inspector.editor().is_editing());
    }

    #[test]
    fn test_apply_css() {
        let (_, card, _) = page();
        let mut inspector = active();
        assert_eq!(inspector.apply_css("width: 1px"), Err(DomError::Detached));

        inspector.mouse_over(card.clone());
        let report = inspector.apply_css("width: 10px;\nheight: 20px;").unwrap();
        assert_eq!(report.applied_count(), 2);
        let layout = inspector.state().element_info().unwrap().group(StyleGroupName::Layout).unwrap();
        assert_eq!(layout.styles.get("height"), Some("20px"));
    }

    #[test]
    fn test_copy_feedback_window() {
        let (_, card, _) = page();
        let mut inspector = active();
        let t0 = Instant::now();
        assert_eq!(inspector.copy_css_at(t0), None);

        inspector.mouse_over(card);
        assert!(inspector.copy_css_at(t0).is_some());
        assert!(inspector.copy_feedback_active_at(t0 + Duration::from_millis(1000)));
        assert_eq!(inspector.copy_css_at(t0 + Duration::from_millis(1000)), None);
        assert!(!inspector.copy_feedback_active_at(t0 + Duration::from_millis(1500)));
        assert!(inspector.copy_css_at(t0 + Duration::from_millis(1600)).is_some());
    }

    #[test]
    fn test_frame_hover_only() {
        let (_, card, _) = page();
        let mut inspector = active();
        inspector.mouse_move(Point::new(20.0, 20.0));
        inspector.mouse_over(card);

        let frame = inspector.frame(&viewport());
        let hover = frame.hover.unwrap();
        assert_eq!(hover.rect, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert!(hover.guides.is_some());
        assert!(frame.selection.is_none());
        assert!(frame.spacing.is_empty());
        assert_eq!(frame.panel, Some(Point::new(35.0, 20.0)));
    }

    #[test]
    fn test_frame_spacing_after_unpin() {
        let (_, card, badge) = page();
        let mut inspector = active();
        inspector.mouse_over(card.clone());
        inspector.click(card);
        // Unpin from the panel so the hover can move on while keeping the selection.
        inspector.toggle_pin(Some(false));
        inspector.mouse_over(badge);

        let frame = inspector.frame(&viewport());
        assert!(frame.hover.unwrap().guides.is_none());
        assert!(frame.selection.unwrap().guides.is_some());
        let sides: Vec<_> = frame.spacing.iter().map(|s| s.side).collect();
        assert_eq!(sides, vec![Side::Top, Side::Left]);
        assert_eq!(frame.spacing_on(Side::Top).unwrap().label, 50);
    }

    #[test]
    fn test_pinned_panel_stays_put() {
        let (_, card, _) = page();
        let mut inspector = active();
        inspector.mouse_move(Point::new(20.0, 20.0));
        inspector.mouse_over(card.clone());
        inspector.click(card);
        let first = inspector.frame(&viewport()).panel;

        inspector.mouse_move(Point::new(400.0, 300.0));
        assert_eq!(inspector.frame(&viewport()).panel, first);

        inspector.toggle_pin(Some(false));
        assert_eq!(inspector.frame(&viewport()).panel, Some(Point::new(415.0, 300.0)));
    }

    #[test]
    fn test_detached_hover_hides_overlays() {
        let (_, card, _) = page();
        let mut inspector = active();
        inspector.mouse_over(card.clone());
        card.detach();
        let frame = inspector.frame(&viewport());
        assert!(frame.hover.is_none());
        assert!(frame.panel.is_none());
    }

    #[test]
    fn test_toggle_off_resets_everything() {
        let (_, card, _) = page();
        let mut inspector = active();
        inspector.mouse_over(card.clone());
        inspector.click(card);
        inspector.begin_edit(StyleGroupName::Layout, "width");

        inspector.toggle_scan(Some(false));
        assert!(!inspector.state().pinned());
        assert!(inspector.state().hovered().is_none());
        assert!(inspector.state().selected().is_none());
        assert!(!inspector.editor().is_editing());
    }
}
