//! StyleScan Web
//!
//! The browser content script: a `web-sys` implementation of the core DOM
//! trait, the injected overlay nodes, the info panel and event wiring.

pub mod error;
pub mod panel_view;
pub mod style_text;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod bridge;
#[cfg(target_arch = "wasm32")]
mod clipboard;
#[cfg(target_arch = "wasm32")]
pub mod element;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod overlay_dom;
#[cfg(target_arch = "wasm32")]
mod panel;
#[cfg(target_arch = "wasm32")]
mod web;

pub use error::{WebError, WebResult};
pub use panel_view::{PanelAction, PanelView};

#[cfg(target_arch = "wasm32")]
pub use element::WebElement;
#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
