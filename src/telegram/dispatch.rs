//! Notification dispatch loop
//!
//! Consumes queued lifecycle notifications and delivers them until the
//! shutdown channel flips or the queue is closed. Runs alongside the watch
//! loop under the same shutdown signal.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::notifier::Notifier;
use super::types::{Notification, NotificationType};
use crate::logger::{self, LogTag};

/// Render a notification as the outgoing message text.
pub fn format_notification(notification: &Notification) -> String {
    match &notification.notification_type {
        NotificationType::BotStarted { version } => {
            format!("Delisting watcher started (v{})", version)
        }
        NotificationType::BotStopped { reason } => {
            format!("Delisting watcher stopped: {}", reason)
        }
    }
}

/// Run the dispatch loop until shutdown.
///
/// Notifications already queued when shutdown arrives are drained best-effort;
/// the supervisor bounds how long that drain may take.
pub async fn run_dispatch_loop(
    notifier: Arc<dyn Notifier>,
    mut queue: mpsc::Receiver<Notification>,
    mut shutdown: watch::Receiver<bool>,
) {
    logger::info(LogTag::Telegram, "Notification dispatcher started");

    loop {
        tokio::select! {
            received = queue.recv() => {
                match received {
                    Some(notification) => deliver(notifier.as_ref(), &notification).await,
                    None => break,
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    // Drain whatever is already queued before exiting.
                    while let Ok(notification) = queue.try_recv() {
                        deliver(notifier.as_ref(), &notification).await;
                    }
                    break;
                }
            }
        }
    }

    logger::info(LogTag::Telegram, "Notification dispatcher stopped");
}

async fn deliver(notifier: &dyn Notifier, notification: &Notification) {
    let text = format_notification(notification);
    if let Err(e) = notifier.send_message(&text).await {
        logger::error(
            LogTag::Telegram,
            &format!("Failed to deliver notification: {}", e),
        );
    }
}
