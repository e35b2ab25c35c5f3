/// Error types for App Dock
use thiserror::Error;

use crate::entry::EntryId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("Address already loaded: {0}")]
    DuplicateAddress(String),

    #[error("Frame failed to load for entry {0}")]
    FrameLoadFailed(EntryId),

    #[error("Failed to read {key} from storage: {reason}")]
    PersistenceReadFailed { key: String, reason: String },

    #[error("Failed to write {key} to storage: {reason}")]
    PersistenceWriteFailed { key: String, reason: String },

    #[error("Failed to deliver message to {destination}: {reason}")]
    DeliveryFailed { destination: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DockError::PersistenceWriteFailed {
            key: "dock.entries".to_string(),
            reason: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to write dock.entries to storage: quota");
    }
}
