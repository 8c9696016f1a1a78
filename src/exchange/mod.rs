//! Binance exchange integration
//!
//! The watch loop only depends on the [`Fetcher`] trait; the signed HTTP
//! client lives behind it so tests can substitute scripted fetchers.

mod binance;
pub mod signing;

pub use binance::BinanceClient;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::logger::{self, LogTag};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("received bad status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to sign request: {0}")]
    Signature(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One exchange-announced batch of symbols ceasing trading at a given instant.
#[derive(Debug, Clone, Deserialize)]
pub struct DelistSchedule {
    /// Delist instant in milliseconds since the Unix epoch
    #[serde(rename = "delistTime")]
    pub delist_time: i64,
    pub symbols: Vec<String>,
}

impl DelistSchedule {
    /// Delist instant as a UTC timestamp.
    ///
    /// An out-of-range `delistTime` falls back to the Unix epoch, with a
    /// warning carrying the raw value.
    pub fn delist_time_utc(&self) -> DateTime<Utc> {
        match Utc.timestamp_millis_opt(self.delist_time).single() {
            Some(ts) => ts,
            None => {
                logger::warning(
                    LogTag::Exchange,
                    &format!(
                        "Delist time {} is out of range, falling back to epoch",
                        self.delist_time
                    ),
                );
                DateTime::default()
            }
        }
    }
}

/// Retrieves the current set of delisting schedules.
///
/// Implementations must complete within a bounded timeout and have no side
/// effects beyond the outbound request. Schedule order is preserved by callers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_schedules(&self) -> Result<Vec<DelistSchedule>, FetchError>;
}
