//! Telegram integration
//!
//! [`TelegramNotifier`] delivers a single text message to the configured
//! channel; [`run_dispatch_loop`] is the notifier's own long-running loop for
//! queued lifecycle notifications. The watch loop only sees the [`Notifier`]
//! trait.

mod dispatch;
mod notifier;
mod types;

pub use dispatch::{format_notification, run_dispatch_loop};
pub use notifier::{Notifier, NotifyError, TelegramNotifier};
pub use types::{Notification, NotificationType};
