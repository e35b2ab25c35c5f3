/// Runs workspace effects against the page and feeds browser events back in
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use log::{debug, error, info, warn};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{KeyboardEvent, MessageEvent};
use yew::Callback;
use yew::platform::time::sleep;

use crate::Result;
use crate::command::Command;
use crate::entry::{EntryId, FrameHandle};
use crate::error::DockError;
use crate::keys::{KeyAction, KeyInput, bind};
use crate::notify::{Notification, TOAST_LIFETIME_MS, Toasts};
use crate::router::{Destination, MessageSink, relay};
use crate::settings::{DEFAULT_SIDEBAR_WIDTH, FontSize, Settings};
use crate::storage::{
    Snapshot, load_settings, load_snapshot, restore_sidebar_width, save_settings, save_snapshot,
};
use crate::workspace::{Action, Effect, Workspace};

use super::frames::FrameHost;
use super::store::LocalStore;
use super::{post_to_parent, send_command};

/// Everything the sidebar renders
#[derive(Debug, Clone)]
pub struct DockState {
    pub workspace: Workspace,
    pub toasts: Toasts,
    pub settings: Settings,
    pub sidebar_open: bool,
    pub settings_open: bool,
    pub sidebar_width: u32,
}

impl Default for DockState {
    fn default() -> Self {
        DockState {
            workspace: Workspace::new(),
            toasts: Toasts::new(),
            settings: Settings::default(),
            sidebar_open: false,
            settings_open: false,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
        }
    }
}

pub struct Driver {
    this: Weak<Driver>,
    state: RefCell<DockState>,
    frames: RefCell<FrameHost>,
    store: LocalStore,
    on_change: RefCell<Callback<()>>,
}

impl Driver {
    pub fn new() -> Rc<Driver> {
        Rc::new_cyclic(|this: &Weak<Driver>| {
            let weak = this.clone();
            let frames = FrameHost::new(Rc::new(move |id: EntryId, handle: FrameHandle| {
                if let Some(driver) = weak.upgrade() {
                    driver.dispatch(Action::FrameLoadFailed { id, handle });
                }
            }));

            Driver {
                this: this.clone(),
                state: RefCell::new(DockState::default()),
                frames: RefCell::new(frames),
                store: LocalStore::open(),
                on_change: RefCell::new(Callback::from(|_| ())),
            }
        })
    }

    pub fn state(&self) -> Ref<'_, DockState> {
        self.state.borrow()
    }

    /// Called after every state change
    pub fn set_on_change(&self, callback: Callback<()>) {
        *self.on_change.borrow_mut() = callback;
    }

    /// Load saved entries and settings, then create their frames
    pub fn restore(&self) {
        if !self.store.is_available() {
            warn!("Running without persistent storage");
        }
        let snapshot = load_snapshot(&self.store).unwrap_or_else(|| Snapshot::new(Vec::new(), 1));
        let settings = load_settings(&self.store);
        let width = restore_sidebar_width(&self.store, viewport_width());

        let effects = {
            let mut state = self.state.borrow_mut();
            state.workspace = Workspace::restore(snapshot);
            state.settings = settings;
            state.sidebar_width = width;
            state.workspace.take_effects()
        };
        self.run(effects);
    }

    pub fn dispatch(&self, action: Action) {
        debug!("Dispatch {:?}", action);
        let effects = self.state.borrow_mut().workspace.update(action);
        self.run(effects);
    }

    /// Apply effects in order; a failed frame creation feeds back as an action
    fn run(&self, effects: Vec<Effect>) {
        let mut pending: VecDeque<Effect> = effects.into();
        while let Some(effect) = pending.pop_front() {
            if let Some(action) = self.apply(effect) {
                let more = self.state.borrow_mut().workspace.update(action);
                pending.extend(more);
            }
        }
        self.changed();
    }

    fn apply(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::CreateFrame {
                id,
                handle,
                address,
                visible,
            } => {
                let created = self
                    .frames
                    .borrow_mut()
                    .create(id, handle, &address, visible);
                if let Err(e) = created {
                    error!("{}: {}", DockError::FrameLoadFailed(id), e);
                    return Some(Action::FrameLoadFailed { id, handle });
                }
            }
            Effect::DestroyFrame(id) => self.frames.borrow_mut().destroy(id),
            Effect::ShowFrame { id, visible } => {
                if let Err(e) = self.frames.borrow().show(id, visible) {
                    warn!("{}", e);
                }
            }
            Effect::Activate(id) => {
                if let Err(e) = self.frames.borrow().activate(id) {
                    warn!("{}", e);
                }
            }
            Effect::Persist => {
                let snapshot = self.state.borrow().workspace.snapshot();
                save_snapshot(&self.store, &snapshot);
            }
            Effect::Notify(notification) => self.notify(notification),
        }
        None
    }

    fn changed(&self) {
        let callback = self.on_change.borrow().clone();
        callback.emit(());
    }

    fn notify(&self, notification: Notification) {
        let id = self.state.borrow_mut().toasts.push(notification);
        let this = self.this.clone();
        spawn_local(async move {
            sleep(Duration::from_millis(TOAST_LIFETIME_MS)).await;
            if let Some(driver) = this.upgrade() {
                driver.dismiss_toast(id);
            }
        });
    }

    pub fn dismiss_toast(&self, id: Uuid) {
        let dismissed = self.state.borrow_mut().toasts.dismiss(id);
        if dismissed {
            self.changed();
        }
    }

    pub fn on_message(&self, event: &MessageEvent) {
        let source = event
            .source()
            .and_then(|source| self.frames.borrow().entry_for_source(&source));

        let state = self.state.borrow();
        let frames = self.frames.borrow();
        relay(&state.workspace, &WebSink { frames: &frames }, source, event.data());
    }

    pub fn on_key(&self, event: &KeyboardEvent) {
        let input = KeyInput {
            key: event.key(),
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
            shift: event.shift_key(),
        };
        let binding = {
            let state = self.state.borrow();
            bind(
                &input,
                state.sidebar_open,
                !state.workspace.selection().is_empty(),
            )
        };
        let Some(binding) = binding else {
            return;
        };

        if binding.prevent_default {
            event.prevent_default();
        }
        match binding.action {
            KeyAction::Pin => self.pin(),
            KeyAction::Dispatch(action) => self.dispatch(action),
        }
    }

    /// Close the sidebar and ask the parent page to pin this app
    pub fn pin(&self) {
        self.state.borrow_mut().sidebar_open = false;
        if let Err(e) = send_command(&Command::Pin) {
            debug!("Pin not sent: {}", e);
        }
        self.changed();
    }

    pub fn toggle_sidebar(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.sidebar_open = !state.sidebar_open;
        }
        self.changed();
    }

    pub fn toggle_settings(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.settings_open = !state.settings_open;
        }
        self.changed();
    }

    pub fn set_font_size(&self, font_size: FontSize) {
        self.update_settings(|settings| settings.font_size = font_size);
    }

    pub fn set_compact_mode(&self, compact_mode: bool) {
        self.update_settings(|settings| settings.compact_mode = compact_mode);
    }

    fn update_settings(&self, change: impl FnOnce(&mut Settings)) {
        let settings = {
            let mut state = self.state.borrow_mut();
            change(&mut state.settings);
            state.settings.clone()
        };
        save_settings(&self.store, &settings);
        info!("Settings changed: {:?}", settings);
        self.changed();
    }
}

/// Posts router deliveries to frame windows or the parent page
struct WebSink<'a> {
    frames: &'a FrameHost,
}

impl MessageSink<JsValue> for WebSink<'_> {
    fn post(&self, destination: Destination, payload: &JsValue) -> Result<()> {
        match destination {
            Destination::Parent => post_to_parent(payload),
            Destination::Frame(id) => self.frames.post(id, payload),
        }
        .map_err(|reason| DockError::DeliveryFailed {
            destination: destination.to_string(),
            reason,
        })
    }
}

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(f64::from(DEFAULT_SIDEBAR_WIDTH) / 0.9)
}

