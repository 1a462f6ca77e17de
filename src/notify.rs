//! Transient user notifications

use std::fmt::Debug;

/// How loudly a notification should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational
    Info,
    /// Something the user should act on
    Warning,
    /// An action failed
    Error,
}

/// A short message shown to the user once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Create a warning
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }
}

/// Surface that displays notifications
pub trait Notifier: Debug + Send + Sync {
    /// Show a notification
    fn notify(&self, notification: Notification);
}
