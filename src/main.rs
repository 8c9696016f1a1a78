use delistbot::logger::{self, LogTag};

#[tokio::main]
async fn main() {
    logger::init();
    logger::info(LogTag::System, "Delisting watcher starting up...");

    match delistbot::run::run_bot().await {
        Ok(_) => {
            logger::info(LogTag::System, "Delisting watcher stopped");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("Delisting watcher failed: {:#}", e));
            std::process::exit(1);
        }
    }
}
