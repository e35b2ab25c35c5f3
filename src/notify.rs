/// Transient user notifications (toasts)
use uuid::Uuid;

use crate::error::DockError;

/// How long a toast stays on screen
pub const TOAST_LIFETIME_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: Level,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: Level) -> Notification {
        Notification {
            message: message.into(),
            level,
        }
    }

    pub fn success(message: impl Into<String>) -> Notification {
        Self::new(message, Level::Success)
    }

    pub fn error(message: impl Into<String>) -> Notification {
        Self::new(message, Level::Error)
    }

    pub fn warning(message: impl Into<String>) -> Notification {
        Self::new(message, Level::Warning)
    }

    /// User-facing text for an error, if the error is ever shown at all
    pub fn for_error(err: &DockError) -> Option<Notification> {
        match err {
            DockError::InvalidAddress(address) if address.is_empty() => {
                Some(Self::error("Please enter a URL"))
            }
            DockError::InvalidAddress(_) => Some(Self::error("Please enter a valid URL")),
            DockError::DuplicateAddress(_) => Some(Self::warning("This URL is already loaded")),
            // Reported by the frame lifecycle with the entry title
            DockError::FrameLoadFailed(_) => None,
            DockError::PersistenceReadFailed { .. }
            | DockError::PersistenceWriteFailed { .. }
            | DockError::DeliveryFailed { .. } => None,
        }
    }

    pub fn deleted(titles: &[String]) -> Notification {
        match titles {
            [title] => Self::success(format!("Deleted: {}", title)),
            _ => Self::success(format!(
                "Deleted {} apps: {}",
                titles.len(),
                titles.join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub notification: Notification,
}

/// Toasts currently on screen, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Toast { id, notification });
        id
    }

    /// Remove a toast; an id that is already gone is a no-op
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let original_len = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() < original_len
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
