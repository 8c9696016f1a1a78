//! Signed HTTP client for the Binance delisting-schedule endpoint

use std::time::Duration;

use reqwest::Client;

use super::signing::sign_query;
use super::{DelistSchedule, FetchError, Fetcher};
use crate::config::BinanceConfig;
use crate::constants::{BINANCE_BASE_URL, DELIST_SCHEDULE_ENDPOINT, FETCH_TIMEOUT_SECS};
use crate::logger::{self, LogTag};

pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl BinanceClient {
    pub fn new(config: &BinanceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: BINANCE_BASE_URL.to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    fn timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[async_trait::async_trait]
impl Fetcher for BinanceClient {
    async fn fetch_schedules(&self) -> Result<Vec<DelistSchedule>, FetchError> {
        let query = format!("timestamp={}", Self::timestamp_ms());
        let signature = sign_query(&query, &self.api_secret).map_err(FetchError::Signature)?;
        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, DELIST_SCHEDULE_ENDPOINT, query, signature
        );

        let resp = self
            .client
            .get(&url)
            .header("content-type", "application/json")
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let schedules: Vec<DelistSchedule> = serde_json::from_str(&body)?;

        logger::debug(
            LogTag::Exchange,
            &format!("Fetched {} delisting schedules", schedules.len()),
        );

        Ok(schedules)
    }
}
