//! Symbol dedup tracking

use std::collections::HashSet;

/// Set of symbols already reported to the channel.
///
/// Grows monotonically for the process lifetime; no eviction, no TTL, no
/// persistence across restarts. Owned exclusively by the watch loop, so no
/// locking is needed.
#[derive(Debug, Default)]
pub struct DedupTracker {
    notified: HashSet<String>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a symbol has already been reported.
    pub fn contains(&self, symbol: &str) -> bool {
        self.notified.contains(symbol)
    }

    /// Mark a symbol as reported. Returns false if it was already marked.
    pub fn mark(&mut self, symbol: &str) -> bool {
        self.notified.insert(symbol.to_string())
    }

    pub fn len(&self) -> usize {
        self.notified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }
}
