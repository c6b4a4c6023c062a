//! Homework bot - review status notifier
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and forwards them to a Telegram chat.

pub mod config;
pub mod error;
pub mod homework;
pub mod io;
pub mod notifier;
pub mod poller;
pub mod practicum;
pub mod telegram;

pub use config::{load_config, Config};
pub use error::{FailureKind, HomeworkBotError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::homework::VerdictTable;
use crate::io::ReqwestHttpClient;
use crate::poller::Poller;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Run the homework bot with the given configuration
pub async fn run(config: Config) -> Result<()> {
    config.validate_tokens()?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::default());
    let cancel = CancellationToken::new();

    let api = Arc::new(PracticumClient::new(&config.practicum, Arc::clone(&http)));
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram, Arc::clone(&http)));

    let mut poller = Poller::new(
        api,
        notifier,
        VerdictTable::default(),
        Duration::from_secs(config.retry_period_seconds),
        poller::current_epoch_secs(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
        cancel_for_signal.cancel();
    });

    tracing::info!("Homework bot started");

    // Blocks until cancelled
    poller.run(cancel).await;

    tracing::info!("Homework bot stopped");
    Ok(())
}
