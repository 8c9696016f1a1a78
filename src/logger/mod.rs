//! Tagged logging for the delisting watcher
//!
//! Provides a small structured logging API with:
//! - Standard log levels (Error/Warning/Info/Debug)
//! - Per-component tags for filtering and scanning output
//! - Colored console output with timestamps
//!
//! The minimum level comes from the `LOG_LEVEL` environment variable
//! (the bot has no command-line surface). Errors are always shown.
//!
//! ## Usage
//!
//! ```rust
//! use delistbot::logger::{self, LogTag};
//!
//! logger::init();
//! logger::info(LogTag::Watcher, "Watch loop started");
//! logger::error(LogTag::Exchange, "Fetch failed");
//! ```

mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

use once_cell::sync::OnceCell;

static MIN_LEVEL: OnceCell<LogLevel> = OnceCell::new();

/// Initialize the logger system.
///
/// Call once at startup before any logging occurs. Reads `LOG_LEVEL`
/// (error/warning/info/debug, case-insensitive, default info).
pub fn init() {
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|raw| LogLevel::from_str(&raw))
        .unwrap_or(LogLevel::Info);
    let _ = MIN_LEVEL.set(level);
}

fn min_level() -> LogLevel {
    MIN_LEVEL.get().copied().unwrap_or(LogLevel::Info)
}

fn should_log(level: LogLevel) -> bool {
    // Errors always log
    if level == LogLevel::Error {
        return true;
    }
    level <= min_level()
}

fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(level) {
        return;
    }
    format::format_and_log(tag, level.as_str(), message);
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics, needs `LOG_LEVEL=debug`)
pub fn debug(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Debug, message);
}
