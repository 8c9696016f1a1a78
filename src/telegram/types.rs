//! Lifecycle notification types queued to the dispatch loop

use chrono::{DateTime, Utc};

/// Types of lifecycle notifications that can be sent
#[derive(Clone, Debug)]
pub enum NotificationType {
    /// Bot startup notification
    BotStarted { version: String },

    /// Bot shutdown notification
    BotStopped { reason: String },
}

/// A notification with timestamp
#[derive(Clone, Debug)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Create a new notification with current timestamp
    pub fn new(notification_type: NotificationType) -> Self {
        Self {
            notification_type,
            timestamp: Utc::now(),
        }
    }

    pub fn bot_started() -> Self {
        Self::new(NotificationType::BotStarted {
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub fn bot_stopped(reason: &str) -> Self {
        Self::new(NotificationType::BotStopped {
            reason: reason.to_string(),
        })
    }
}
