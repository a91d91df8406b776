//! User-facing notifications and confirmation prompts.
//!
//! The desk pages never print. They report outcomes through a [`Notifier`]
//! (toast-style title + message) and ask before destructive actions through
//! [`Confirm`]. Frontends decide how either is shown.

use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A transient user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Notification {
    /// Success notification.
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notification.
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Displays notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Asks the user a yes/no question before a destructive action.
pub trait Confirm {
    /// `true` when the user confirmed.
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Emits notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => tracing::info!(title = %notification.title, "{}", notification.message),
            Level::Error => tracing::error!(title = %notification.title, "{}", notification.message),
        }
    }
}

/// Keeps every notification in memory, in order.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Snapshot of everything notified so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Answers every confirmation with a fixed value (`--yes`, tests).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, title: &str, message: &str) -> bool {
        tracing::debug!(title, message, answer = self.0, "Auto-confirming");
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_log() {
        let notifier = RecordingNotifier::default();
        let clone = notifier.clone();

        clone.notify(Notification::success("Success", "Saved."));
        notifier.notify(Notification::error("Error", "Failed."));

        let all = notifier.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].level, Level::Success);
        assert_eq!(clone.last(), Some(Notification::error("Error", "Failed.")));
    }

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm(true).confirm("Are you sure?", "Delete"));
        assert!(!AutoConfirm(false).confirm("Are you sure?", "Delete"));
    }
}
