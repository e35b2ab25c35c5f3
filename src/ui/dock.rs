/// Sidebar UI for App Dock
use std::rc::Rc;

use log::error;
use patternfly_yew::prelude::*;
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, KeyboardEvent, MessageEvent};
use yew::prelude::*;

use crate::selection::Direction;
use crate::settings::FontSize;
use crate::web::driver::Driver;
use crate::web::frames::CONTAINER_ID;
use crate::workspace::{Action, Flag};

use super::rows::{EntryRow, ToastStack};

#[function_component(Dock)]
pub fn dock() -> Html {
    let driver = use_memo((), |_| Driver::new());
    let update = use_force_update();
    let address = use_state(String::new);

    // Restore saved state and listen for page events on mount
    {
        let driver: Rc<Driver> = (*driver).clone();
        use_effect_with((), move |_| {
            driver.set_on_change(Callback::from(move |_| update.force_update()));
            driver.restore();

            let on_message = {
                let driver = driver.clone();
                Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| driver.on_message(&e))
            };
            let on_key = {
                let driver = driver.clone();
                Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| driver.on_key(&e))
            };

            let window = web_sys::window();
            if let Some(window) = &window {
                for (event, listener) in [
                    ("message", on_message.as_ref()),
                    ("keydown", on_key.as_ref()),
                ] {
                    if let Err(e) =
                        window.add_event_listener_with_callback(event, listener.unchecked_ref())
                    {
                        error!("Failed to listen for {}: {:?}", event, e);
                    }
                }
            }

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback(
                        "message",
                        on_message.as_ref().unchecked_ref(),
                    );
                    let _ = window
                        .remove_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
                }
                drop(on_message);
                drop(on_key);
            }
        });
    }

    let on_address_input = {
        let address = address.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                address.set(input.value());
            }
        })
    };

    // Clear the input only when the address was actually added
    let load = {
        let driver = driver.clone();
        let address = address.clone();
        Rc::new(move || {
            let before = driver.state().workspace.len();
            driver.dispatch(Action::Load((*address).clone()));
            if driver.state().workspace.len() > before {
                address.set(String::new());
            }
        })
    };
    let on_load = {
        let load = load.clone();
        Callback::from(move |_: MouseEvent| load())
    };
    let on_address_key = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            load();
        }
    });

    let on_delete = {
        let driver = driver.clone();
        Callback::from(move |index: usize| driver.dispatch(Action::RemoveAt(index)))
    };

    let on_select = {
        let driver = driver.clone();
        Callback::from(move |(index, multi): (usize, bool)| {
            driver.dispatch(Action::Select { index, multi })
        })
    };
    let on_toggle = {
        let driver = driver.clone();
        Callback::from(move |(index, flag): (usize, Flag)| {
            driver.dispatch(Action::ToggleFlag { index, flag })
        })
    };
    let on_move = {
        let driver = driver.clone();
        Callback::from(move |(index, direction): (usize, Direction)| {
            driver.dispatch(Action::Reorder { index, direction })
        })
    };
    let on_delete_selected = {
        let driver = driver.clone();
        Callback::from(move |_: MouseEvent| driver.dispatch(Action::RemoveSelected))
    };

    let on_toggle_sidebar = {
        let driver = driver.clone();
        Callback::from(move |_: MouseEvent| driver.toggle_sidebar())
    };
    let on_toggle_settings = {
        let driver = driver.clone();
        Callback::from(move |_: MouseEvent| driver.toggle_settings())
    };
    let on_font_size = {
        let driver = driver.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            match select.value().parse::<FontSize>() {
                Ok(font_size) => driver.set_font_size(font_size),
                Err(e) => error!("{}", e),
            }
        })
    };
    let on_compact_mode = {
        let driver = driver.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                driver.set_compact_mode(input.checked());
            }
        })
    };
    let on_dismiss = {
        let driver = driver.clone();
        Callback::from(move |id: Uuid| driver.dismiss_toast(id))
    };

    let state = driver.state();
    let workspace = &state.workspace;
    let last_index = workspace.len().saturating_sub(1);

    html! {
        <div class="dock">
            <div
                class={classes!("sidebar", state.sidebar_open.then_some("open"))}
                style={format!("width: {}px;", state.sidebar_width)}
            >
                <button class="sidebar-toggle" onclick={on_toggle_sidebar}>
                    {if state.sidebar_open { "›" } else { "‹" }}
                </button>

                <div class={state.settings.content_classes()}>
                    <div class="sidebar-header">
                        <h1 class="sidebar-title">{"App Dock"}</h1>
                        <Button onclick={on_toggle_settings} variant={ButtonVariant::Plain}>
                            {"⚙"}
                        </Button>
                    </div>

                    if state.settings_open {
                        <div class="settings-panel">
                            <label>
                                {"Font size "}
                                <select onchange={on_font_size}>
                                    {for FontSize::ALL.iter().map(|size| html! {
                                        <option
                                            value={size.as_str()}
                                            selected={*size == state.settings.font_size}
                                        >
                                            {size.as_str()}
                                        </option>
                                    })}
                                </select>
                            </label>
                            <label>
                                <input
                                    type="checkbox"
                                    checked={state.settings.compact_mode}
                                    onchange={on_compact_mode}
                                />
                                {" Compact mode"}
                            </label>
                        </div>
                    }

                    <div class="load-form">
                        <input
                            type="url"
                            class="url-input"
                            placeholder="https://..."
                            value={(*address).clone()}
                            oninput={on_address_input}
                            onkeydown={on_address_key}
                        />
                        <Button onclick={on_load} variant={ButtonVariant::Primary}>
                            {"Load"}
                        </Button>
                    </div>

                    <div class="app-list">
                        if workspace.is_empty() {
                            <p class="empty-list">{"No apps loaded"}</p>
                        }
                        {for workspace.entries().iter().enumerate().map(|(index, entry)| html! {
                            <EntryRow
                                key={entry.id}
                                index={index}
                                entry={entry.clone()}
                                selected={workspace.selection().contains(index)}
                                is_first={index == 0}
                                is_last={index == last_index}
                                on_select={on_select.clone()}
                                on_toggle={on_toggle.clone()}
                                on_move={on_move.clone()}
                                on_delete={on_delete.clone()}
                            />
                        })}
                    </div>

                    <div class="list-actions">
                        <Button
                            onclick={on_delete_selected}
                            variant={ButtonVariant::Danger}
                            disabled={workspace.selection().is_empty()}
                        >
                            {format!("Delete selected ({})", workspace.selection().len())}
                        </Button>
                    </div>
                </div>
            </div>

            <div id={CONTAINER_ID} class="frame-container"></div>

            <ToastStack toasts={state.toasts.clone()} on_dismiss={on_dismiss} />
        </div>
    }
}
