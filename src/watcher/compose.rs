//! Message composition with the group-drop dedup rule

use super::dedup::DedupTracker;
use crate::exchange::DelistSchedule;

/// Build one outgoing message from a batch of schedules.
///
/// Walks each schedule's symbols in order. Hitting an already-notified symbol
/// abandons that schedule's block entirely: symbols marked before the
/// collision stay marked even though no text is emitted for them, and the
/// remaining symbols of the schedule are not examined. Blocks for the
/// surviving schedules are concatenated in fetch order. An empty return value
/// means nothing new was announced this tick.
pub fn compose_message(schedules: &[DelistSchedule], tracker: &mut DedupTracker) -> String {
    let mut message = String::new();

    'schedules: for schedule in schedules {
        let mut symbols = String::new();

        for (i, symbol) in schedule.symbols.iter().enumerate() {
            if tracker.contains(symbol) {
                continue 'schedules;
            }

            if i == schedule.symbols.len() - 1 {
                symbols.push_str(&format!("{}\n\n", symbol));
            } else {
                symbols.push_str(&format!("{}\n", symbol));
            }

            tracker.mark(symbol);
        }

        message.push_str(&format!(
            "New delisting scheduled on {}\n{}",
            schedule.delist_time_utc().format("%Y-%m-%d %H:%M:%S UTC"),
            symbols
        ));
    }

    message
}
