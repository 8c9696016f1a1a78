//! Environment-based configuration
//!
//! All settings come from the process environment (a `.env` file is honored
//! when present). Missing or invalid required settings are fatal at startup.

use std::time::Duration;

use thiserror::Error;

use crate::constants::DEFAULT_WATCH_INTERVAL_SECS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Binance API credentials used to sign the delisting-schedule fetch
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub api_key: String,
    pub api_secret: String,
}

/// Telegram bot credentials and destination channel
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub channel_id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub binance: BinanceConfig,
    pub telegram: TelegramConfig,
    /// Wait between the end of one watch iteration and the next
    pub watch_interval: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// real environment variables take precedence over it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let interval_secs = match std::env::var("WATCH_INTERVAL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "WATCH_INTERVAL_SECS",
                    reason: format!("'{}' is not a whole number of seconds", raw),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: "WATCH_INTERVAL_SECS",
                        reason: "interval must be at least 1 second".to_string(),
                    });
                }
                secs
            }
            Err(_) => DEFAULT_WATCH_INTERVAL_SECS,
        };

        Ok(Self {
            binance: BinanceConfig {
                api_key: require("BINANCE_API_KEY")?,
                api_secret: require("BINANCE_API_SECRET")?,
            },
            telegram: TelegramConfig {
                bot_token: require("TG_BOT_TOKEN")?,
                channel_id: require("TG_BOT_DELISTING_CHANNEL_ID")?,
            },
            watch_interval: Duration::from_secs(interval_secs),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
