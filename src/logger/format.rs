//! Log formatting and output with ANSI colors
//!
//! Handles colorized console output with tag and level formatting and
//! broken-pipe-safe printing for piped invocations.

use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format width for tag alignment
const TAG_WIDTH: usize = 8;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: &str, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();

    let line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        format_tag(&tag),
        format_level(level),
        message
    );

    print_stdout_safe(&line);
}

/// Format a tag with appropriate color
fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.as_str(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Config => padded.bright_white().bold(),
        LogTag::Exchange => padded.bright_cyan().bold(),
        LogTag::Telegram => padded.bright_blue().bold(),
        LogTag::Watcher => padded.bright_green().bold(),
    }
}

/// Format a level label with appropriate color
fn format_level(level: &str) -> ColoredString {
    match level {
        "ERROR" => level.red().bold(),
        "WARNING" => level.yellow().bold(),
        "INFO" => level.normal(),
        "DEBUG" => level.dimmed(),
        _ => level.normal(),
    }
}

/// Print to stdout, ignoring broken pipes (e.g. `delistbot | head`)
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() != ErrorKind::BrokenPipe {
            eprintln!("{}", line);
        }
    }
    let _ = out.flush();
}
