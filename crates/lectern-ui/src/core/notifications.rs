//! User-visible notification queue.
//!
//! # Design
//! - Ids are monotonic per queue and never reused.
//! - Nothing expires on its own; entries leave only through [`Notifications::remove`].

use std::fmt::Display;

/// Notification severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Informational.
    Info,
    /// Operation succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// Operation failed.
    Error,
}

impl Severity {
    /// CSS modifier for the toast.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Single queued notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Queue-unique id.
    pub id: u64,
    /// Display message.
    pub message: String,
    /// Severity classification.
    pub severity: Severity,
}

/// Ordered notification queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    /// Queue a message and return its id.
    pub fn add(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
        });
        id
    }

    /// Queue an error using its display text.
    pub fn error(&mut self, err: &impl Display) -> u64 {
        self.add(err.to_string(), Severity::Error)
    }

    /// Remove the notification with `id`; unknown ids are ignored.
    pub fn remove(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
    }

    /// Queued notifications, oldest first.
    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut queue = Notifications::default();
        let first = queue.add("one", Severity::Info);
        let second = queue.add("two", Severity::Success);
        queue.remove(second);
        let third = queue.add("three", Severity::Warning);
        assert!(first < second && second < third);
    }

    #[test]
    fn remove_drops_only_matching_entry() {
        let mut queue = Notifications::default();
        let keep = queue.add("keep", Severity::Info);
        let drop = queue.add("drop", Severity::Info);
        queue.remove(drop);
        queue.remove(999);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].id, keep);
    }

    #[test]
    fn errors_use_display_text() {
        let mut queue = Notifications::default();
        queue.error(&ApiError::Status {
            status: 500,
            message: "boom".into(),
        });
        let item = &queue.items()[0];
        assert_eq!(item.severity, Severity::Error);
        assert_eq!(item.message, "boom");
    }

    #[test]
    fn queue_is_unbounded() {
        let mut queue = Notifications::default();
        for n in 0..50 {
            queue.add(format!("n{n}"), Severity::Info);
        }
        assert_eq!(queue.items().len(), 50);
    }
}
