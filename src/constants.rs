//! Shared constants for the delisting watcher

/// Binance REST API base URL
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Delisting schedule endpoint (signed)
pub const DELIST_SCHEDULE_ENDPOINT: &str = "/sapi/v1/spot/delist-schedule";

/// HTTP client timeout for exchange requests
pub const FETCH_TIMEOUT_SECS: u64 = 15;

/// Default wait between the end of one watch iteration and the next
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 10;

/// Bounded wait for in-flight work during shutdown
pub const SHUTDOWN_GRACE_SECS: u64 = 5;

/// Capacity of the lifecycle notification queue
pub const NOTIFICATION_QUEUE_SIZE: usize = 32;
