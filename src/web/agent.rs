/// Runs the menu automation agent inside an embedded frame
use log::{debug, error, info, warn};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{MessageEvent, Response};

use crate::automation::{AgentConfig, MenuAgent, parse_targets};

use super::send_command;

/// Register the trigger, load the targets, then start answering menus
pub fn start(config: AgentConfig) {
    spawn_local(async move {
        if let Err(e) = run(config).await {
            error!("Automation failed to start: {}", e);
        }
    });
}

async fn run(config: AgentConfig) -> Result<(), String> {
    if let Err(e) = send_command(&config.registration()) {
        warn!("Trigger not registered: {}", e);
    }

    let agent = match fetch_targets(&config).await {
        Ok(targets) => MenuAgent::new(config, targets),
        Err(e) => {
            error!("Failed to load targets from {}: {}", config.feed_url, e);
            MenuAgent::stopped(config)
        }
    };

    listen(agent)
}

async fn fetch_targets(config: &AgentConfig) -> Result<Vec<String>, String> {
    let window = web_sys::window().ok_or("No window")?;

    let response: Response = JsFuture::from(window.fetch_with_str(&config.feed_url))
        .await
        .map_err(|e| format!("Fetch failed: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Fetch did not return a Response".to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let json = response
        .json()
        .map_err(|e| format!("Failed to read body: {:?}", e))?;
    let json = JsFuture::from(json)
        .await
        .map_err(|e| format!("Failed to parse body: {:?}", e))?;
    let records: Value = serde_wasm_bindgen::from_value(json)
        .map_err(|e| format!("Failed to parse targets: {:?}", e))?;

    Ok(parse_targets(&records, &config.id_field))
}

fn listen(mut agent: MenuAgent) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;

    let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let Ok(message) = serde_wasm_bindgen::from_value::<Value>(event.data()) else {
            return;
        };
        for command in agent.handle(&message) {
            debug!("Automation sends {:?}", command);
            if let Err(e) = send_command(&command) {
                warn!("{}", e);
            }
        }
    });
    window
        .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
        .map_err(|e| format!("Failed to listen for messages: {:?}", e))?;
    // lives as long as the page
    on_message.forget();

    info!("Automation listening");
    Ok(())
}
