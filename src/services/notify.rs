//! Notification seam for reschedule announcements.
//!
//! The reschedule workflow builds the message; implementations own the
//! transport. Delivery failure never rolls back the schedule change that
//! triggered the announcement, so the caller only records the outcome.

use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure reported by a notifier backend.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// A reschedule announcement addressed to affected students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Display name shown as the sender
    pub sender: String,
    /// Recipient addresses
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Delivery backend for notifications.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notifier that writes announcements to the log instead of delivering them.
///
/// The default backend when no mail transport is configured; delivery
/// always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        log::info!(
            "notification '{}' from '{}' to {} recipient(s): {}",
            notification.subject,
            notification.sender,
            notification.recipients.len(),
            notification.recipients.join(", ")
        );
        log::debug!("notification body:\n{}", notification.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_always_delivers() {
        let notifier = LogNotifier;
        let notification = Notification {
            sender: "Routine Management System".to_string(),
            recipients: vec!["student@university.example".to_string()],
            subject: "Routine Rescheduled".to_string(),
            body: "details".to_string(),
        };
        assert!(notifier.send(&notification).await.is_ok());
    }
}
