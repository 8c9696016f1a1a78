//! Delisting watch loop
//!
//! Orchestrates fetch → filter → compose → send on a fixed cadence:
//! - The tick timer is rearmed only after an iteration finishes, so
//!   iterations never overlap; a slow fetch stretches the effective interval.
//! - Every failure inside an iteration is caught at the iteration boundary
//!   and logged; the loop always makes forward progress.
//! - Shutdown is cooperative, observed only between iterations.

mod compose;
mod dedup;

pub use compose::compose_message;
pub use dedup::DedupTracker;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::exchange::{FetchError, Fetcher};
use crate::logger::{self, LogTag};
use crate::telegram::{Notifier, NotifyError};

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to get delistings: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to send message: {0}")]
    Notify(#[from] NotifyError),

    #[error("iteration panicked: {0}")]
    Fault(String),
}

pub struct DelistWatcher {
    fetcher: Arc<dyn Fetcher>,
    notifier: Arc<dyn Notifier>,
    tracker: DedupTracker,
    interval: Duration,
}

impl DelistWatcher {
    /// Build a watcher with a fresh dedup tracker.
    ///
    /// The tracker is owned here and never shared; it lives as long as the
    /// watcher.
    pub fn new(fetcher: Arc<dyn Fetcher>, notifier: Arc<dyn Notifier>, interval: Duration) -> Self {
        Self {
            fetcher,
            notifier,
            tracker: DedupTracker::new(),
            interval,
        }
    }

    /// Run until the shutdown channel flips (or its sender is dropped).
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        logger::info(
            LogTag::Watcher,
            &format!(
                "Watching Binance delisting schedule every {}s",
                self.interval.as_secs()
            ),
        );

        loop {
            if *shutdown.borrow() {
                logger::info(LogTag::Watcher, "Stopping delisting watcher");
                return;
            }

            if let Err(e) = self.run_once().await {
                logger::error(
                    LogTag::Watcher,
                    &format!("Delisting watcher iteration failed: {}", e),
                );
            }

            // Rearm only after the iteration finished so ticks never overlap.
            tokio::select! {
                _ = sleep(self.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        logger::info(LogTag::Watcher, "Stopping delisting watcher");
                        return;
                    }
                }
            }
        }
    }

    /// One fetch → filter → compose → send cycle.
    ///
    /// A send failure does not roll back dedup state: symbols marked during
    /// composition stay marked, so that notification is permanently lost.
    /// Panics inside the cycle are contained and surfaced as a fault.
    pub async fn run_once(&mut self) -> Result<(), WatchError> {
        let fetcher = self.fetcher.clone();
        let notifier = self.notifier.clone();
        let tracker = &mut self.tracker;

        let iteration = async move {
            let schedules = fetcher.fetch_schedules().await?;
            let message = compose_message(&schedules, tracker);

            if !message.is_empty() {
                notifier.send_message(&message).await?;
            }

            Ok(())
        };

        match AssertUnwindSafe(iteration).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(WatchError::Fault(panic_message(panic))),
        }
    }

    /// Number of symbols reported so far.
    pub fn notified_count(&self) -> usize {
        self.tracker.len()
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::DelistSchedule;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::time::timeout;

    const DELIST_MS: i64 = 1_700_000_000_000;
    const HEADER: &str = "New delisting scheduled on 2023-11-14 22:13:20 UTC";

    fn schedule(symbols: &[&str]) -> DelistSchedule {
        DelistSchedule {
            delist_time: DELIST_MS,
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Fetcher that replays a scripted sequence of results, then empty batches.
    struct ScriptedFetcher {
        script: Mutex<VecDeque<Result<Vec<DelistSchedule>, FetchError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<Vec<DelistSchedule>, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch_schedules(&self) -> Result<Vec<DelistSchedule>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    struct PanickingFetcher;

    #[async_trait]
    impl Fetcher for PanickingFetcher {
        async fn fetch_schedules(&self) -> Result<Vec<DelistSchedule>, FetchError> {
            panic!("fetcher exploded");
        }
    }

    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
        fail: AtomicBool,
    }

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                messages: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
            })
        }

        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }

        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(NotifyError::Send("scripted failure".to_string()));
            }
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn watcher(
        fetcher: Arc<dyn Fetcher>,
        notifier: Arc<dyn Notifier>,
    ) -> DelistWatcher {
        DelistWatcher::new(fetcher, notifier, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn notifies_each_symbol_at_most_once() {
        let batch = vec![schedule(&["BTCUP", "BTCDOWN"])];
        let fetcher = ScriptedFetcher::new(vec![Ok(batch.clone()), Ok(batch)]);
        let notifier = RecordingNotifier::new();
        let mut watcher = watcher(fetcher.clone(), notifier.clone());

        watcher.run_once().await.unwrap();
        watcher.run_once().await.unwrap();

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], format!("{}\nBTCUP\nBTCDOWN\n\n", HEADER));
        assert_eq!(watcher.notified_count(), 2);
    }

    #[tokio::test]
    async fn overlapping_batches_never_repeat_symbols() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(vec![schedule(&["AAA"])]),
            Ok(vec![schedule(&["AAA", "BBB"]), schedule(&["CCC"])]),
        ]);
        let notifier = RecordingNotifier::new();
        let mut watcher = watcher(fetcher, notifier.clone());

        watcher.run_once().await.unwrap();
        watcher.run_once().await.unwrap();

        let messages = notifier.messages();
        assert_eq!(messages.len(), 2);
        // The overlapping schedule is abandoned wholesale; only CCC survives.
        assert!(messages[1].contains("CCC"));
        assert!(!messages[1].contains("AAA"));
        assert!(!messages[1].contains("BBB"));
    }

    #[tokio::test]
    async fn empty_fetch_sends_nothing() {
        let fetcher = ScriptedFetcher::new(vec![Ok(Vec::new())]);
        let notifier = RecordingNotifier::new();
        let mut watcher = watcher(fetcher, notifier.clone());

        watcher.run_once().await.unwrap();

        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn fetch_error_does_not_stop_the_loop() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(FetchError::Status {
                status: 401,
                body: "signature rejected".to_string(),
            }),
            Ok(vec![schedule(&["AAA"])]),
        ]);
        let notifier = RecordingNotifier::new();
        let mut watcher = watcher(fetcher, notifier.clone());

        let err = watcher.run_once().await.unwrap_err();
        assert!(matches!(err, WatchError::Fetch(_)));

        watcher.run_once().await.unwrap();
        assert_eq!(notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn send_failure_keeps_symbols_marked() {
        let batch = vec![schedule(&["AAA"])];
        let fetcher = ScriptedFetcher::new(vec![Ok(batch.clone()), Ok(batch)]);
        let notifier = RecordingNotifier::new();
        notifier.set_failing(true);
        let mut watcher = watcher(fetcher, notifier.clone());

        let err = watcher.run_once().await.unwrap_err();
        assert!(matches!(err, WatchError::Notify(_)));
        assert_eq!(watcher.notified_count(), 1);

        // The notification is permanently lost: the next identical batch is
        // already deduped, so nothing is retried.
        notifier.set_failing(false);
        watcher.run_once().await.unwrap();
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn panic_in_iteration_is_contained() {
        let notifier = RecordingNotifier::new();
        let mut watcher = watcher(Arc::new(PanickingFetcher), notifier.clone());

        let err = watcher.run_once().await.unwrap_err();
        assert!(matches!(err, WatchError::Fault(_)));
        assert_eq!(err.to_string(), "iteration panicked: fetcher exploded");

        // The watcher stays usable after the fault.
        assert_eq!(watcher.notified_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_before_start_prevents_any_fetch() {
        let fetcher = ScriptedFetcher::new(vec![]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(fetcher.clone(), notifier);

        let (shutdown_tx, shutdown_rx) = watch::channel(true);
        watcher.run(shutdown_rx).await;
        drop(shutdown_tx);

        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn cancellation_while_waiting_stops_before_next_fetch() {
        let fetcher = ScriptedFetcher::new(vec![]);
        let notifier = RecordingNotifier::new();
        // Long interval: the loop is guaranteed to be waiting when we cancel.
        let watcher = DelistWatcher::new(
            fetcher.clone(),
            notifier,
            Duration::from_secs(60),
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(watcher.run(shutdown_rx));

        // Give the first iteration time to complete, then cancel.
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        timeout(Duration::from_secs(1), handle)
            .await
            .expect("watcher should stop promptly")
            .unwrap();

        assert_eq!(fetcher.calls(), 1);
    }
}
