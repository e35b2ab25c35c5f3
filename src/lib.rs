/// App Dock - sidebar container for embedded web apps
/// Built with Rust + WASM + Yew

pub mod automation;
pub mod command;
pub mod entry;
pub mod error;
pub mod keys;
pub mod notify;
pub mod roster;
pub mod router;
pub mod selection;
pub mod settings;
pub mod storage;
pub mod title;
pub mod ui;
pub mod web;
pub mod workspace;

use wasm_bindgen::prelude::*;

use crate::automation::AgentConfig;
pub use crate::error::DockError;

pub type Result<T> = std::result::Result<T, DockError>;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

#[wasm_bindgen]
pub fn derive_title(address: &str) -> String {
    title::derive_title(address)
}

// Start the Yew app for the sidebar
#[wasm_bindgen]
pub fn start_dock() {
    yew::Renderer::<ui::Dock>::new().render();
}

/// Start the menu automation agent; `config` may override any label
#[wasm_bindgen]
pub fn start_automation(config: JsValue) -> std::result::Result<(), JsValue> {
    let config: AgentConfig = if config.is_undefined() || config.is_null() {
        AgentConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid automation config: {}", e)))?
    };
    web::agent::start(config);
    Ok(())
}

/// Build the automation target feed from an exported member table
#[wasm_bindgen]
pub fn prepare_roster(table_html: &str, cutoff: &str) -> std::result::Result<String, JsValue> {
    let to_js = |e: roster::RosterError| JsValue::from_str(&e.to_string());
    let rows = roster::parse_table(table_html).map_err(to_js)?;
    let cutoff = roster::parse_cutoff(cutoff).map_err(to_js)?;
    let inactive = roster::select_inactive(&rows, cutoff);
    log::info!("{} of {} members selected", inactive.len(), rows.len());
    serde_json::to_string_pretty(&inactive).map_err(|e| JsValue::from_str(&e.to_string()))
}
