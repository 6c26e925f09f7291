//! Async clipboard access. Both directions are best effort.

use wasm_bindgen_futures::JsFuture;

/// Copy text to the clipboard.
pub fn copy_text_to_clipboard(text: &str) {
    let text = text.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            match JsFuture::from(clipboard.write_text(&text)).await {
                Ok(_) => log::info!("CSS copied to clipboard ({} bytes)", text.len()),
                Err(e) => log::warn!("Failed to copy to clipboard: {:?}", e),
            }
        }
    });
}

/// Read the clipboard text and hand it to `on_text`.
pub fn read_text_from_clipboard(on_text: impl FnOnce(String) + 'static) {
    wasm_bindgen_futures::spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = window.navigator().clipboard();
        match JsFuture::from(clipboard.read_text()).await {
            Ok(value) => match value.as_string() {
                Some(text) => on_text(text),
                None => log::warn!("Clipboard returned non-text data"),
            },
            Err(e) => log::warn!("Failed to read clipboard: {:?}", e),
        }
    });
}
