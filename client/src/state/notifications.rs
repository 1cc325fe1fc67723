//! Flashbar notification queue shared by every route.
//!
//! DESIGN
//! ======
//! Newest entries sit at the front. Entries only leave the queue when the user
//! dismisses them: there is no cap, no de-duplication and no expiry timer, so
//! a long session that keeps failing will keep growing the list.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use std::collections::VecDeque;

use policies::ApiError;

/// Severity tag rendered as the flashbar item type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl NotificationKind {
    /// CSS modifier for the flashbar item.
    pub fn class_suffix(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    fn log_tag(self) -> &'static str {
        match self {
            Self::Success | Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// A transient, user-dismissible status message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub header: String,
    pub content: String,
    pub dismissible: bool,
}

impl Notification {
    /// Build a dismissible notification whose content is
    /// `[<timestamp>] [<LEVEL>] <message>`.
    pub fn stamped(kind: NotificationKind, header: &str, message: &str, timestamp: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            header: header.to_owned(),
            content: format!("[{timestamp}] [{}] {message}", kind.log_tag()),
            dismissible: true,
        }
    }

    /// Error notification for a failed operation.
    pub fn error(header: &str, message: &str, timestamp: &str) -> Self {
        Self::stamped(NotificationKind::Error, header, message, timestamp)
    }

    /// Success notification for a completed operation.
    pub fn success(header: &str, message: &str, timestamp: &str) -> Self {
        Self::stamped(NotificationKind::Success, header, message, timestamp)
    }
}

/// Ordered notification list, most recent first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
}

impl NotificationQueue {
    /// Prepend a notification.
    pub fn push(&mut self, notification: Notification) {
        self.items.push_front(notification);
    }

    /// Remove the notification with `id`. Returns whether one was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Notification for a failed API call, or `None` when the failure class is
/// logged only.
pub fn notification_for(err: &ApiError, header: &str, timestamp: &str) -> Option<Notification> {
    if !err.is_surfaced() {
        return None;
    }
    let message = match err {
        ApiError::Rejected { message } => message.clone(),
        other => other.to_string(),
    };
    Some(Notification::error(header, &message, timestamp))
}
