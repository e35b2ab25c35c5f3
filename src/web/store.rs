/// `localStorage`-backed key-value store
use log::warn;
use web_sys::Storage;

use crate::Result;
use crate::error::DockError;
use crate::storage::KeyValueStore;

/// Reads as empty and rejects writes when the browser gives no storage
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| match w.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                warn!("localStorage unavailable: {:?}", e);
                None
            }
        });
        LocalStore { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage
            .get_item(key)
            .map_err(|e| DockError::PersistenceReadFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| DockError::PersistenceWriteFailed {
                key: key.to_string(),
                reason: "no localStorage".to_string(),
            })?;
        storage
            .set_item(key, value)
            .map_err(|e| DockError::PersistenceWriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
