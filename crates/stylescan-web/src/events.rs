//! DOM event listener registration and event decoding.

use kurbo::{Size, Vec2};
use stylescan_core::{KeyInput, Modifiers, Viewport};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent, Window};

use crate::error::WebResult;

struct Registration {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

/// Owns listener closures and removes them when dropped.
#[derive(Default)]
pub struct EventListeners {
    registrations: Vec<Registration>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        capture: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> WebResult<()> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback_and_bool(event, callback.as_ref().unchecked_ref(), capture)?;
        self.registrations.push(Registration {
            target: target.clone(),
            event,
            capture,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl Drop for EventListeners {
    fn drop(&mut self) {
        for r in &self.registrations {
            if let Err(e) = r.target.remove_event_listener_with_callback_and_bool(
                r.event,
                r.callback.as_ref().unchecked_ref(),
                r.capture,
            ) {
                log::debug!("Failed to remove {} listener: {:?}", r.event, e);
            }
        }
    }
}

/// Convert a `keydown` event to the core key model.
///
/// With Alt held some layouts report a composed character (`ç` on macOS),
/// so letter keys fall back to the physical key code.
pub fn key_input(event: &KeyboardEvent) -> KeyInput {
    let modifiers = Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    };
    let code = event.code();
    let key = match code.strip_prefix("Key") {
        Some(letter) if modifiers.alt && letter.len() == 1 => letter.to_lowercase(),
        _ => event.key(),
    };
    KeyInput { key, modifiers }
}

fn number(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// Current scroll offset, viewport size and document height.
pub fn viewport(window: &Window) -> Viewport {
    let scroll = Vec2::new(window.scroll_x().unwrap_or(0.0), window.scroll_y().unwrap_or(0.0));
    let size = Size::new(number(window.inner_width()), number(window.inner_height()));
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(size.height);
    Viewport::new(scroll, size, document_height)
}
