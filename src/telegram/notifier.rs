//! Telegram notifier for sending messages
//!
//! Wraps the teloxide bot with the configured destination chat.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use thiserror::Error;

use crate::config::TelegramConfig;
use crate::logger::{self, LogTag};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("bot token is empty")]
    EmptyToken,

    #[error("invalid chat ID '{0}'")]
    InvalidChatId(String),

    #[error("failed to send telegram message: {0}")]
    Send(String),
}

/// Message delivery seam between the watch loop and Telegram.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one text message to the configured destination.
    async fn send_message(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug)]
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier
    ///
    /// # Arguments
    /// * `bot_token` - Telegram bot token from @BotFather
    /// * `chat_id` - Chat ID to send notifications to
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self, NotifyError> {
        if bot_token.trim().is_empty() {
            return Err(NotifyError::EmptyToken);
        }

        let chat_id_parsed: i64 = chat_id
            .parse()
            .map_err(|_| NotifyError::InvalidChatId(chat_id.to_string()))?;

        Ok(Self {
            bot: Bot::new(bot_token),
            chat_id: ChatId(chat_id_parsed),
        })
    }

    /// Create a notifier from config
    pub fn from_config(config: &TelegramConfig) -> Result<Self, NotifyError> {
        Self::new(&config.bot_token, &config.channel_id)
    }

    /// Validate the token against the Bot API before the loops start.
    pub async fn validate(&self) -> Result<(), NotifyError> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| NotifyError::Send(format!("token validation failed: {}", e)))?;

        logger::info(
            LogTag::Telegram,
            &format!(
                "Bot initialized: @{} (ID: {})",
                me.username.as_deref().unwrap_or("unknown"),
                me.id
            ),
        );

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(self.chat_id, text)
            .await
            .map_err(|e| NotifyError::Send(e.to_string()))?;

        logger::debug(
            LogTag::Telegram,
            &format!("Sent Telegram message (length={})", text.len()),
        );

        Ok(())
    }
}
