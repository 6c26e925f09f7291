//! Extension runtime messages (`chrome.runtime.onMessage`).

use stylescan_core::ExtensionMessage;
use wasm_bindgen::prelude::*;

use crate::error::WebResult;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn add_runtime_message_listener(callback: &js_sys::Function) -> Result<(), JsValue>;
}

/// Decode a message posted by the popup or background script.
pub fn decode_message(value: JsValue) -> Option<ExtensionMessage> {
    match serde_wasm_bindgen::from_value::<serde_json::Value>(value) {
        Ok(json) => ExtensionMessage::from_value(json),
        Err(e) => {
            log::debug!("Ignoring undecodable runtime message: {}", e);
            None
        }
    }
}

/// Listener registered with the extension runtime.
pub struct MessageBridge {
    _on_message: Closure<dyn FnMut(JsValue)>,
}

impl MessageBridge {
    /// Forward every decodable runtime message to `handler`.
    pub fn listen(mut handler: impl FnMut(ExtensionMessage) + 'static) -> WebResult<Self> {
        let on_message = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            if let Some(message) = decode_message(value) {
                handler(message);
            }
        });
        add_runtime_message_listener(on_message.as_ref().unchecked_ref())?;
        Ok(Self {
            _on_message: on_message,
        })
    }
}
