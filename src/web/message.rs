/// Routing view over raw `postMessage` data
use js_sys::{Object, Reflect};
use log::debug;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};

use crate::entry::EntryId;
use crate::router::{Payload, SOURCE_ID_FIELD, SOURCE_URL_FIELD, TARGET_ID_FIELD};

// Copies are shallow, so nested values (typed arrays, dates, NaN) pass through as is.
impl Payload for JsValue {
    fn is_blank(&self) -> bool {
        self.is_null() || self.is_undefined()
    }

    fn is_record(&self) -> bool {
        self.is_object()
    }

    fn routing_field(&self, key: &str) -> Option<Value> {
        let field = Reflect::get(self, &JsValue::from_str(key)).ok()?;
        if field.is_undefined() {
            return None;
        }
        serde_wasm_bindgen::from_value(field).ok()
    }

    fn tagged(&self, id: EntryId, address: &str) -> Option<Self> {
        let copy = shallow_copy(self);
        Reflect::set(&copy, &JsValue::from_str(SOURCE_ID_FIELD), &JsValue::from(id)).ok()?;
        Reflect::set(
            &copy,
            &JsValue::from_str(SOURCE_URL_FIELD),
            &JsValue::from_str(address),
        )
        .ok()?;
        Some(copy.into())
    }

    fn stripped(&self) -> Self {
        let copy = shallow_copy(self);
        for key in [SOURCE_ID_FIELD, SOURCE_URL_FIELD, TARGET_ID_FIELD] {
            if let Err(e) = Reflect::delete_property(&copy, &JsValue::from_str(key)) {
                debug!("Could not strip {}: {:?}", key, e);
            }
        }
        copy.into()
    }
}

fn shallow_copy(value: &JsValue) -> Object {
    Object::assign(&Object::new(), value.unchecked_ref::<Object>())
}
