/// Component tags for log filtering and scanning
///
/// Each long-lived component of the bot logs under its own tag so the
/// console output can be scanned by origin.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    /// Startup, shutdown, supervision
    System,
    /// Configuration loading
    Config,
    /// Binance API requests
    Exchange,
    /// Telegram delivery and dispatch
    Telegram,
    /// The delisting watch loop
    Watcher,
}

impl LogTag {
    /// Plain (uncolored) tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Exchange => "EXCHANGE",
            LogTag::Telegram => "TELEGRAM",
            LogTag::Watcher => "WATCHER",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
