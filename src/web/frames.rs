/// Embedded frame host: owns the `<iframe>` elements of every live entry
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlIFrameElement};

use crate::entry::{EntryId, FrameHandle};

pub const CONTAINER_ID: &str = "frame-container";

const SANDBOX: &str = "allow-scripts allow-same-origin allow-forms allow-popups \
    allow-popups-to-escape-sandbox allow-modals allow-orientation-lock \
    allow-pointer-lock allow-presentation allow-top-navigation-by-user-activation";
const ALLOW: &str = "accelerometer; autoplay; camera; encrypted-media; fullscreen; \
    geolocation; gyroscope; magnetometer; microphone; midi; payment; \
    picture-in-picture; usb; vr; xr-spatial-tracking";
const REFERRER_POLICY: &str = "no-referrer-when-downgrade";
const ACTIVE_CLASS: &str = "active";

struct LiveFrame {
    element: HtmlIFrameElement,
    _on_error: Closure<dyn FnMut(Event)>,
}

pub type LoadErrorHandler = Rc<dyn Fn(EntryId, FrameHandle)>;

pub struct FrameHost {
    frames: HashMap<EntryId, LiveFrame>,
    on_error: LoadErrorHandler,
}

impl FrameHost {
    pub fn new(on_error: LoadErrorHandler) -> Self {
        FrameHost {
            frames: HashMap::new(),
            on_error,
        }
    }

    pub fn create(
        &mut self,
        id: EntryId,
        handle: FrameHandle,
        address: &str,
        visible: bool,
    ) -> Result<(), String> {
        self.destroy(id);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let container = document
            .get_element_by_id(CONTAINER_ID)
            .ok_or_else(|| format!("No #{} element", CONTAINER_ID))?;

        let element: HtmlIFrameElement = document
            .create_element("iframe")
            .map_err(|e| format!("Failed to create frame: {:?}", e))?
            .dyn_into()
            .map_err(|_| "Created element is not an iframe".to_string())?;

        element.set_class_name("app-frame");
        element.set_src(address);
        for (name, value) in [
            ("sandbox", SANDBOX),
            ("allow", ALLOW),
            ("referrerpolicy", REFERRER_POLICY),
        ] {
            element
                .set_attribute(name, value)
                .map_err(|e| format!("Failed to set {}: {:?}", name, e))?;
        }
        set_visible(&element, visible)?;

        let on_error = self.on_error.clone();
        let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| on_error(id, handle));
        element.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        container
            .append_child(&element)
            .map_err(|e| format!("Failed to attach frame: {:?}", e))?;

        debug!("Created frame for app {} ({:?})", id, handle);
        self.frames.insert(
            id,
            LiveFrame {
                element,
                _on_error: on_error,
            },
        );
        Ok(())
    }

    pub fn destroy(&mut self, id: EntryId) {
        if let Some(frame) = self.frames.remove(&id) {
            frame.element.set_onerror(None);
            frame.element.remove();
            debug!("Destroyed frame for app {}", id);
        }
    }

    pub fn show(&self, id: EntryId, visible: bool) -> Result<(), String> {
        match self.frames.get(&id) {
            Some(frame) => set_visible(&frame.element, visible),
            None => Err(format!("No frame for app {}", id)),
        }
    }

    /// Clear the active marker everywhere, then set it on `id`
    pub fn activate(&self, id: Option<EntryId>) -> Result<(), String> {
        for frame in self.frames.values() {
            frame
                .element
                .class_list()
                .remove_1(ACTIVE_CLASS)
                .map_err(|e| format!("Failed to clear active frame: {:?}", e))?;
        }
        if let Some(frame) = id.and_then(|id| self.frames.get(&id)) {
            frame
                .element
                .class_list()
                .add_1(ACTIVE_CLASS)
                .map_err(|e| format!("Failed to mark active frame: {:?}", e))?;
        }
        Ok(())
    }

    /// The entry whose frame window is `source`
    pub fn entry_for_source(&self, source: &JsValue) -> Option<EntryId> {
        self.frames.iter().find_map(|(id, frame)| {
            let window = frame.element.content_window()?;
            js_sys::Object::is(&window, source).then_some(*id)
        })
    }

    pub fn post(&self, id: EntryId, message: &JsValue) -> Result<(), String> {
        let window = self
            .frames
            .get(&id)
            .and_then(|frame| frame.element.content_window())
            .ok_or_else(|| format!("No frame window for app {}", id))?;
        window
            .post_message(message, "*")
            .map_err(|e| format!("Failed to post to app {}: {:?}", id, e))
    }
}

fn set_visible(element: &HtmlIFrameElement, visible: bool) -> Result<(), String> {
    let style = element.style();
    let (visibility, pointer_events) = if visible {
        ("visible", "auto")
    } else {
        ("hidden", "none")
    };
    style
        .set_property("visibility", visibility)
        .and_then(|_| style.set_property("pointer-events", pointer_events))
        .map_err(|e| format!("Failed to style frame: {:?}", e))
}
