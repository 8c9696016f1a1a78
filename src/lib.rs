pub mod config;
pub mod constants;
pub mod exchange;
pub mod logger;
pub mod run;
pub mod telegram;
pub mod watcher;
