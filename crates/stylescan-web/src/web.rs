//! WebAssembly entry point.

use stylescan_core::ScanConfig;
use wasm_bindgen::prelude::*;

/// `localStorage` key holding an optional JSON config override.
pub const CONFIG_STORAGE_KEY: &str = "stylescan-config";

/// Read the config override from `localStorage`, falling back to defaults.
pub fn load_config() -> ScanConfig {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(CONFIG_STORAGE_KEY).ok().flatten());
    let Some(json) = stored else {
        return ScanConfig::default();
    };
    match ScanConfig::from_json(&json) {
        Ok(config) => {
            log::info!("Loaded config from localStorage");
            config
        }
        Err(e) => {
            log::warn!("Ignoring stored config: {}", e);
            ScanConfig::default()
        }
    }
}

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    log::info!("Starting StyleScan (WASM)");

    if let Err(e) = crate::app::start(load_config()) {
        log::warn!("StyleScan failed to start: {}", e);
    }
}
