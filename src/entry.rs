/// Data structures for App Dock entries
use serde::{Deserialize, Serialize};

/// Process-unique entry id, never reused within a session
pub type EntryId = u32;

/// Identity of one live frame; a recreated frame always gets a new handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// A live embedded frame owned by exactly one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub handle: FrameHandle,
    pub active: bool,
}

impl Frame {
    pub fn new(handle: FrameHandle) -> Frame {
        Frame {
            handle,
            active: false,
        }
    }
}

/// Lifecycle state of an entry's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    NoFrame,
    FrameHidden,
    FrameVisibleInactive,
    FrameActive,
}

/// One user-loaded address
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub address: String,
    pub title: String,
    pub visible: bool,
    pub enabled: bool,
    pub(crate) frame: Option<Frame>,
}

impl Entry {
    pub fn new(id: EntryId, address: String, title: String) -> Entry {
        Entry {
            id,
            address,
            title,
            visible: true,
            enabled: true,
            frame: None,
        }
    }

    pub fn from_record(record: EntryRecord) -> Entry {
        Entry {
            id: record.id,
            address: record.address,
            title: record.title,
            visible: record.visible,
            enabled: record.enabled,
            frame: None,
        }
    }

    pub fn record(&self) -> EntryRecord {
        EntryRecord {
            id: self.id,
            address: self.address.clone(),
            title: self.title.clone(),
            visible: self.visible,
            enabled: self.enabled,
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.frame.is_some_and(|f| f.active)
    }

    /// Enabled, visible and holding a live frame
    pub fn can_be_active(&self) -> bool {
        self.enabled && self.visible && self.has_frame()
    }

    pub fn frame_state(&self) -> FrameState {
        match &self.frame {
            None => FrameState::NoFrame,
            Some(frame) if frame.active => FrameState::FrameActive,
            Some(_) if self.visible => FrameState::FrameVisibleInactive,
            Some(_) => FrameState::FrameHidden,
        }
    }
}

/// Persisted shape of an entry; the frame is never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryRecord {
    pub id: EntryId,
    #[serde(alias = "url")]
    pub address: String,
    pub title: String,
    pub visible: bool,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> Entry {
        Entry::new(
            7,
            "https://example.com/profile".to_string(),
            "profile".to_string(),
        )
    }

    #[test]
    fn test_entry_creation() {
        let entry = create_test_entry();

        assert_eq!(entry.id, 7);
        assert!(entry.visible);
        assert!(entry.enabled);
        assert!(!entry.has_frame());
        assert_eq!(entry.frame_state(), FrameState::NoFrame);
    }

    #[test]
    fn test_frame_state() {
        let mut entry = create_test_entry();
        entry.frame = Some(Frame::new(FrameHandle(1)));
        assert_eq!(entry.frame_state(), FrameState::FrameVisibleInactive);

        entry.visible = false;
        assert_eq!(entry.frame_state(), FrameState::FrameHidden);
        assert!(!entry.can_be_active());

        entry.visible = true;
        entry.frame = Some(Frame {
            handle: FrameHandle(1),
            active: true,
        });
        assert_eq!(entry.frame_state(), FrameState::FrameActive);
        assert!(entry.is_active());
    }

    #[test]
    fn test_record_excludes_frame() {
        let mut entry = create_test_entry();
        entry.frame = Some(Frame::new(FrameHandle(9)));

        let restored = Entry::from_record(entry.record());

        assert_eq!(restored.address, entry.address);
        assert_eq!(restored.title, entry.title);
        assert!(!restored.has_frame());
    }

    #[test]
    fn test_serialization() {
        let record = create_test_entry().record();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"address\":\"https://example.com/profile\""));
        assert!(!json.contains("frame"));

        let deserialized: EntryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_deserialize_url_alias() {
        let json = r#"{"id":1,"url":"https://a.test","title":"a.test","visible":false,"enabled":true}"#;
        let record: EntryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.address, "https://a.test");
        assert!(!record.visible);
    }
}
