//! Bot supervision: wiring, task spawn, signal handling, bounded shutdown

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{mpsc, watch};
use tokio::time::{timeout, Duration};

use crate::config::Config;
use crate::constants::{NOTIFICATION_QUEUE_SIZE, SHUTDOWN_GRACE_SECS};
use crate::exchange::BinanceClient;
use crate::logger::{self, LogTag};
use crate::telegram::{self, Notification, TelegramNotifier};
use crate::watcher::DelistWatcher;

/// Run the bot until a shutdown signal arrives.
///
/// Configuration or notifier-initialization failures abort before any loop
/// starts. After the signal, both loops get up to the grace period to finish
/// their current work; the process exits either way.
pub async fn run_bot() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    logger::info(LogTag::Config, "Configuration loaded");

    let notifier =
        Arc::new(TelegramNotifier::from_config(&config.telegram).context("invalid telegram settings")?);
    notifier.validate().await?;

    let fetcher = Arc::new(BinanceClient::new(&config.binance)?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (notify_tx, notify_rx) = mpsc::channel(NOTIFICATION_QUEUE_SIZE);

    let dispatch_handle = tokio::spawn(telegram::run_dispatch_loop(
        notifier.clone(),
        notify_rx,
        shutdown_rx.clone(),
    ));

    let watcher = DelistWatcher::new(fetcher, notifier, config.watch_interval);
    let watcher_handle = tokio::spawn(watcher.run(shutdown_rx));

    if notify_tx.send(Notification::bot_started()).await.is_err() {
        logger::warning(
            LogTag::System,
            "Notification queue closed before the startup message",
        );
    }

    wait_for_shutdown_signal().await?;

    let _ = notify_tx
        .send(Notification::bot_stopped("shutdown signal received"))
        .await;
    drop(notify_tx);
    let _ = shutdown_tx.send(true);

    logger::info(
        LogTag::System,
        &format!("Waiting up to {}s for tasks to finish", SHUTDOWN_GRACE_SECS),
    );

    let drain = async {
        let _ = watcher_handle.await;
        let _ = dispatch_handle.await;
    };

    if timeout(Duration::from_secs(SHUTDOWN_GRACE_SECS), drain)
        .await
        .is_err()
    {
        logger::warning(
            LogTag::System,
            "Shutdown grace period elapsed with tasks still running - exiting anyway",
        );
    } else {
        logger::info(LogTag::System, "All tasks finished cleanly");
    }

    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C, SIGTERM on Unix)
async fn wait_for_shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).context("failed to bind SIGINT")?;
        let mut sigterm = signal(SignalKind::terminate()).context("failed to bind SIGTERM")?;

        tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        }
    };

    #[cfg(windows)]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for shutdown signal")?;
        "CTRL_C"
    };

    logger::warning(
        LogTag::System,
        &format!(
            "Shutdown signal received ({}). Press Ctrl+C again to force kill.",
            signal_name
        ),
    );

    // A second interrupt during the grace period exits immediately.
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::error(LogTag::System, "Second Ctrl+C detected - forcing immediate exit.");
            // 130 is the conventional exit code for SIGINT
            std::process::exit(130);
        }
    });

    Ok(())
}
