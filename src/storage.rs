/// Storage serialization utilities for the browser key-value store

use std::cell::RefCell;
use std::collections::HashMap;

use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::Result;
use crate::entry::{EntryId, EntryRecord};
use crate::error::DockError;
use crate::settings::{DEFAULT_SIDEBAR_WIDTH, Settings, clamp_sidebar_width};

pub const ENTRIES_KEY: &str = "dock.entries";
pub const NEXT_ID_KEY: &str = "dock.nextId";
pub const SIDEBAR_WIDTH_KEY: &str = "dock.sidebarWidth";
pub const SETTINGS_KEY: &str = "dock.settings";

/// String key-value store (`localStorage` in the browser)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Persisted entry list, in display order, plus the id counter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub entries: Vec<EntryRecord>,
    pub next_id: EntryId,
}

impl Snapshot {
    pub fn new(entries: Vec<EntryRecord>, next_id: EntryId) -> Self {
        Snapshot { entries, next_id }
    }

    /// Smallest id that no stored entry uses and the counter has not passed
    pub fn safe_next_id(&self) -> EntryId {
        let after_max = self.entries.iter().map(|e| e.id + 1).max().unwrap_or(1);
        self.next_id.max(after_max)
    }
}

fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| DockError::PersistenceReadFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

fn write_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value).map_err(|e| DockError::PersistenceWriteFailed {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &raw)
}

fn try_load_snapshot(store: &impl KeyValueStore) -> Result<Option<Snapshot>> {
    let Some(entries) = read_json::<Vec<EntryRecord>>(store, ENTRIES_KEY)? else {
        return Ok(None);
    };
    let next_id = read_json::<EntryId>(store, NEXT_ID_KEY)?.unwrap_or(1);
    let snapshot = Snapshot::new(entries, next_id);
    let next_id = snapshot.safe_next_id();
    Ok(Some(Snapshot { next_id, ..snapshot }))
}

/// Load the saved entry list; any failure means "no saved state"
pub fn load_snapshot(store: &impl KeyValueStore) -> Option<Snapshot> {
    try_load_snapshot(store).unwrap_or_else(|e| {
        error!("Failed to load apps from storage: {}", e);
        None
    })
}

/// Save the entry list; failures are logged and dropped
pub fn save_snapshot(store: &impl KeyValueStore, snapshot: &Snapshot) {
    let result = write_json(store, ENTRIES_KEY, &snapshot.entries)
        .and_then(|_| write_json(store, NEXT_ID_KEY, &snapshot.next_id));
    if let Err(e) = result {
        warn!("Failed to save apps: {}", e);
    }
}

pub fn load_settings(store: &impl KeyValueStore) -> Settings {
    match read_json::<Settings>(store, SETTINGS_KEY) {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            error!("Failed to load settings: {}", e);
            Settings::default()
        }
    }
}

pub fn save_settings(store: &impl KeyValueStore, settings: &Settings) {
    if let Err(e) = write_json(store, SETTINGS_KEY, settings) {
        warn!("Failed to save settings: {}", e);
    }
}

pub fn load_sidebar_width(store: &impl KeyValueStore) -> Option<u32> {
    read_json::<u32>(store, SIDEBAR_WIDTH_KEY).unwrap_or_else(|e| {
        warn!("Failed to load sidebar width: {}", e);
        None
    })
}

pub fn save_sidebar_width(store: &impl KeyValueStore, width: u32) {
    if let Err(e) = write_json(store, SIDEBAR_WIDTH_KEY, &width) {
        warn!("Failed to save sidebar width: {}", e);
    }
}

/// Stored width clamped to the viewport; a width that had to change is written back
pub fn restore_sidebar_width(store: &impl KeyValueStore, viewport_width: f64) -> u32 {
    let stored = load_sidebar_width(store);
    let width = clamp_sidebar_width(
        f64::from(stored.unwrap_or(DEFAULT_SIDEBAR_WIDTH)),
        viewport_width,
    );
    if stored.is_some_and(|w| w != width) {
        save_sidebar_width(store, width);
    }
    width
}

/// In-memory store, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read fails
    pub fn unreadable() -> Self {
        MemoryStore {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// A store whose every write fails
    pub fn read_only() -> Self {
        MemoryStore {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(DockError::PersistenceReadFailed {
                key: key.to_string(),
                reason: "store unavailable".to_string(),
            });
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(DockError::PersistenceWriteFailed {
                key: key.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FontSize;

    fn create_test_record(id: EntryId, address: &str, title: &str) -> EntryRecord {
        EntryRecord {
            id,
            address: address.to_string(),
            title: title.to_string(),
            visible: true,
            enabled: id % 2 == 1,
        }
    }

    #[test]
    fn test_load_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(load_snapshot(&store), None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = MemoryStore::new();
        let snapshot = Snapshot::new(
            vec![
                create_test_record(3, "https://b.test/x", "x"),
                create_test_record(1, "https://a.test", "a.test"),
            ],
            4,
        );

        save_snapshot(&store, &snapshot);

        assert_eq!(load_snapshot(&store), Some(snapshot));
    }

    #[test]
    fn test_missing_next_id_is_derived() {
        let store = MemoryStore::new();
        store
            .set(
                ENTRIES_KEY,
                r#"[{"id":5,"address":"https://a.test","title":"a.test","visible":true,"enabled":true}]"#,
            )
            .unwrap();

        let snapshot = load_snapshot(&store).unwrap();

        assert_eq!(snapshot.next_id, 6);
    }

    #[test]
    fn test_stale_next_id_is_raised() {
        let snapshot = Snapshot::new(vec![create_test_record(9, "https://a.test", "a")], 2);
        assert_eq!(snapshot.safe_next_id(), 10);
    }

    #[test]
    fn test_corrupt_entries_treated_as_absent() {
        let store = MemoryStore::new();
        store.set(ENTRIES_KEY, "{not json").unwrap();

        assert_eq!(load_snapshot(&store), None);
    }

    #[test]
    fn test_read_failure_treated_as_absent() {
        let store = MemoryStore::unreadable();
        assert_eq!(load_snapshot(&store), None);
        assert_eq!(load_settings(&store), Settings::default());
        assert_eq!(load_sidebar_width(&store), None);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let store = MemoryStore::read_only();
        save_snapshot(&store, &Snapshot::new(Vec::new(), 1));
        save_settings(&store, &Settings::default());

        assert_eq!(store.raw(ENTRIES_KEY), None);
    }

    #[test]
    fn test_settings_round_trip() {
        let store = MemoryStore::new();
        let settings = Settings {
            font_size: FontSize::Small,
            compact_mode: true,
        };

        save_settings(&store, &settings);

        assert_eq!(load_settings(&store), settings);
    }

    #[test]
    fn test_sidebar_width_round_trip() {
        let store = MemoryStore::new();
        save_sidebar_width(&store, 420);
        assert_eq!(load_sidebar_width(&store), Some(420));
        assert_eq!(store.raw(SIDEBAR_WIDTH_KEY), Some("420".to_string()));
    }

    #[test]
    fn test_restore_sidebar_width_writes_back_clamped() {
        let store = MemoryStore::new();
        save_sidebar_width(&store, 1200);

        assert_eq!(restore_sidebar_width(&store, 1000.0), 900);
        assert_eq!(store.raw(SIDEBAR_WIDTH_KEY), Some("900".to_string()));
    }

    #[test]
    fn test_restore_sidebar_width_default_is_not_written() {
        let store = MemoryStore::new();

        assert_eq!(restore_sidebar_width(&store, 1000.0), DEFAULT_SIDEBAR_WIDTH);
        assert_eq!(store.raw(SIDEBAR_WIDTH_KEY), None);
    }
}
