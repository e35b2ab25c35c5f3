/// Browser glue: everything that touches `window`, `document` or `localStorage`
pub mod agent;
pub mod driver;
pub mod frames;
pub mod message;
pub mod store;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::command::Command;

/// Convert to a plain JS value (objects, not `Map`s)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize message: {:?}", e))
}

/// Post to the enclosing page; fails when this document is not embedded
pub fn post_to_parent(message: &JsValue) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let parent = window
        .parent()
        .map_err(|e| format!("Parent window not accessible: {:?}", e))?
        .ok_or("No parent window")?;

    if js_sys::Object::is(&parent, &window) {
        return Err("Not embedded in a parent page".to_string());
    }

    parent
        .post_message(message, "*")
        .map_err(|e| format!("Failed to post to parent: {:?}", e))
}

pub fn send_command(command: &Command) -> Result<(), String> {
    post_to_parent(&to_js(command)?)
}
