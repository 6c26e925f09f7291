//! Errors raised while wiring the content script into the page.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Browser API unavailable: {0}")]
    Unavailable(&'static str),
    #[error("JS error: {0}")]
    Js(String),
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
