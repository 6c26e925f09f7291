//! The content script: wires page events into the inspector and renders the
//! resulting frame into the overlay nodes.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use stylescan_core::{Inspector, ScanConfig};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, KeyboardEvent, MouseEvent, Window};

use crate::bridge::MessageBridge;
use crate::clipboard;
use crate::element::WebElement;
use crate::error::{WebError, WebResult};
use crate::events::{self, EventListeners};
use crate::overlay_dom::OverlayNodes;
use crate::panel::{self, PanelRenderer};
use crate::panel_view::{PanelAction, PanelView};

type Shared = Rc<RefCell<ContentScript>>;

struct Running {
    _script: Shared,
    _listeners: EventListeners,
    _bridge: Option<MessageBridge>,
}

thread_local! {
    static RUNNING: RefCell<Option<Running>> = const { RefCell::new(None) };
}

pub struct ContentScript {
    window: Window,
    inspector: Inspector<WebElement>,
    overlay: OverlayNodes,
    panel: PanelRenderer,
}

impl ContentScript {
    pub fn mount(window: Window, document: Document, config: ScanConfig) -> WebResult<Self> {
        let overlay = OverlayNodes::mount(&document)?;
        let panel = PanelRenderer::new(document, overlay.panel().clone());
        Ok(Self {
            window,
            inspector: Inspector::new(config),
            overlay,
            panel,
        })
    }

    /// Recompute the frame from live DOM state and push it to the page.
    pub fn render(&mut self) {
        let viewport = events::viewport(&self.window);
        let frame = self.inspector.frame(&viewport);
        let config = self.inspector.config();
        let state = self.inspector.state();

        self.overlay
            .update_toggle_button(state.scan_active(), state.button_visible(), config);
        self.overlay.apply(&frame, config);

        let view = PanelView::build(
            state.element_info(),
            self.inspector.editor(),
            self.inspector.copy_feedback_active(),
            state.pinned(),
        );
        self.panel.render(view, frame.panel, config);
    }

    fn on_mouse_over(&mut self, event: &Event) {
        let Some(target) = WebElement::from_target(event.target()) else {
            return;
        };
        if self.inspector.mouse_over(target) {
            self.render();
        }
    }

    fn on_mouse_out(&mut self, event: &MouseEvent) {
        let Some(target) = WebElement::from_target(event.target()) else {
            return;
        };
        let related = WebElement::from_target(event.related_target());
        if self.inspector.mouse_out(&target, related.as_ref()) {
            self.render();
        }
    }

    fn on_mouse_move(&mut self, event: &MouseEvent) {
        self.inspector
            .mouse_move(Point::new(f64::from(event.client_x()), f64::from(event.client_y())));
        let state = self.inspector.state();
        if state.scan_active() && state.hovered().is_some() && !state.pinned() {
            self.render();
        }
    }

    fn on_click(&mut self, event: &Event) {
        let Some(target) = WebElement::from_target(event.target()) else {
            return;
        };
        let outcome = self.inspector.click(target);
        if outcome.consume {
            event.prevent_default();
            event.stop_propagation();
            log::debug!("Click: {:?}", outcome.effect);
            self.render();
        }
    }

    fn on_key_down(&mut self, event: &KeyboardEvent) {
        if self.inspector.key_down(&events::key_input(event)) {
            event.prevent_default();
            self.render();
        }
    }

    fn on_viewport_change(&mut self) {
        if self.inspector.state().scan_active() {
            self.render();
        }
    }

    fn on_edit_input(&mut self, value: &str) {
        if let Err(e) = self.inspector.update_edit(value) {
            log::warn!("Could not apply {}: {}", value, e);
        }
        self.render();
    }

    fn on_edit_commit(&mut self) {
        if let Some(session) = self.inspector.commit_edit() {
            log::debug!("Committed {}: {}", session.property, session.value);
            self.render();
        }
    }

    fn on_paste(&mut self, css_text: &str) {
        match self.inspector.apply_css(css_text) {
            Ok(report) => {
                for failure in report.failures() {
                    log::warn!("Rejected {}: {}", failure.property, failure.value);
                }
                log::info!("Applied {} pasted declarations", report.applied_count());
            }
            Err(e) => log::warn!("Paste failed: {}", e),
        }
        self.render();
    }
}

/// Run `f` unless the script is already borrowed by an outer handler
/// (DOM mutations can dispatch events synchronously).
fn with_script(script: &Shared, f: impl FnOnce(&mut ContentScript)) {
    match script.try_borrow_mut() {
        Ok(mut script) => f(&mut script),
        Err(_) => log::debug!("Skipping re-entrant event"),
    }
}

fn schedule_render(script: &Shared, delay_ms: u64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let script = script.clone();
    let callback = Closure::once_into_js(move || with_script(&script, ContentScript::render));
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay) {
        log::warn!("Failed to schedule render: {:?}", e);
    }
}

fn handle_panel_action(script: &Shared, action: PanelAction) {
    match action {
        PanelAction::CopyCss => {
            let mut feedback_ms = None;
            with_script(script, |app| {
                if let Some(text) = app.inspector.copy_css() {
                    clipboard::copy_text_to_clipboard(&text);
                    feedback_ms = Some(app.inspector.config().copy_feedback_ms);
                    app.render();
                }
            });
            // Clear the "copied" state once it expires.
            if let Some(ms) = feedback_ms {
                schedule_render(script, ms + 10);
            }
        }
        PanelAction::PasteCss => {
            let script = script.clone();
            clipboard::read_text_from_clipboard(move |text| {
                with_script(&script, |app| app.on_paste(&text));
            });
        }
        PanelAction::TogglePin => with_script(script, |app| {
            app.inspector.toggle_pin(None);
            app.render();
        }),
        PanelAction::BeginEdit { group, property } => with_script(script, |app| {
            app.inspector.begin_edit(group, &property);
            app.render();
        }),
    }
}

fn register_listeners(script: &Shared, window: &Window, document: &Document) -> WebResult<EventListeners> {
    let mut listeners = EventListeners::new();

    let s = script.clone();
    listeners.listen(document, "mouseover", true, move |e| {
        with_script(&s, |app| app.on_mouse_over(&e));
    })?;
    let s = script.clone();
    listeners.listen(document, "mouseout", true, move |e| {
        if let Some(e) = e.dyn_ref::<MouseEvent>() {
            with_script(&s, |app| app.on_mouse_out(e));
        }
    })?;
    let s = script.clone();
    listeners.listen(document, "click", true, move |e| {
        with_script(&s, |app| app.on_click(&e));
    })?;
    let s = script.clone();
    listeners.listen(document, "keydown", true, move |e| {
        if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
            with_script(&s, |app| app.on_key_down(e));
        }
    })?;
    let s = script.clone();
    listeners.listen(window, "mousemove", false, move |e| {
        if let Some(e) = e.dyn_ref::<MouseEvent>() {
            with_script(&s, |app| app.on_mouse_move(e));
        }
    })?;
    for event in ["scroll", "resize"] {
        let s = script.clone();
        listeners.listen(window, event, true, move |_| {
            with_script(&s, ContentScript::on_viewport_change);
        })?;
    }

    let (button, panel_element) = {
        let app = script.borrow();
        (app.overlay.toggle_button().clone(), app.panel.element().clone())
    };

    let s = script.clone();
    listeners.listen(&button, "click", false, move |_| {
        with_script(&s, |app| {
            app.inspector.toggle_scan(None);
            app.render();
        });
    })?;

    let s = script.clone();
    listeners.listen(&panel_element, "click", false, move |e| {
        match panel::action_for(&e) {
            Some(PanelAction::BeginEdit { .. }) | None => {}
            Some(action) => handle_panel_action(&s, action),
        }
    })?;
    let s = script.clone();
    listeners.listen(&panel_element, "dblclick", false, move |e| {
        if let Some(action @ PanelAction::BeginEdit { .. }) = panel::action_for(&e) {
            handle_panel_action(&s, action);
        }
    })?;
    let s = script.clone();
    listeners.listen(&panel_element, "input", false, move |e| {
        if let Some(value) = panel::input_value(&e) {
            with_script(&s, |app| app.on_edit_input(&value));
        }
    })?;
    let s = script.clone();
    listeners.listen(&panel_element, "keydown", false, move |e| {
        if e.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == "Enter") {
            with_script(&s, ContentScript::on_edit_commit);
        }
    })?;
    let s = script.clone();
    listeners.listen(&panel_element, "focusout", false, move |_| {
        with_script(&s, ContentScript::on_edit_commit);
    })?;

    Ok(listeners)
}

/// Mount the overlays, register listeners and keep everything alive for the
/// lifetime of the page.
pub fn start(config: ScanConfig) -> WebResult<()> {
    let window = web_sys::window().ok_or(WebError::Unavailable("window"))?;
    let document = window.document().ok_or(WebError::Unavailable("document"))?;

    let script: Shared = Rc::new(RefCell::new(ContentScript::mount(
        window.clone(),
        document.clone(),
        config,
    )?));
    let listeners = register_listeners(&script, &window, &document)?;

    let s = script.clone();
    let bridge = match MessageBridge::listen(move |message| {
        with_script(&s, |app| {
            app.inspector.handle_message(message);
            app.render();
        });
    }) {
        Ok(bridge) => Some(bridge),
        Err(e) => {
            log::warn!("Extension runtime unavailable, only shortcuts will toggle scanning: {}", e);
            None
        }
    };

    script.borrow_mut().render();
    log::info!("StyleScan content script ready ({} listeners)", listeners.len());

    RUNNING.with(|running| {
        *running.borrow_mut() = Some(Running {
            _script: script,
            _listeners: listeners,
            _bridge: bridge,
        });
    });
    Ok(())
}
