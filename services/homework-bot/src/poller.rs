//! Poller: fetches homework statuses and forwards changes

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::homework::{check_response, parse_status, VerdictTable};
use crate::notifier::{send_message, Notifier};
use crate::practicum::HomeworkApi;

/// Prefix of the chat message sent when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// What a single polling cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered
    Notified(String),
    /// The derived message equals the last delivered one
    Unchanged,
    /// A new status message was derived but could not be delivered
    DeliveryFailed(String),
    /// The cycle failed; carries the failure notice
    Failed(String),
}

/// Polls the review API and notifies the chat about status changes
#[derive(Debug)]
pub struct Poller {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    verdicts: VerdictTable,
    retry_period: Duration,
    cursor: i64,
    last_message: Option<String>,
}

impl Poller {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        verdicts: VerdictTable,
        retry_period: Duration,
        cursor: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            verdicts,
            retry_period,
            cursor,
            last_message: None,
        }
    }

    /// Lower bound sent as `from_date` on the next fetch
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    async fn fetch_status(&mut self) -> crate::Result<String> {
        let response = self.api.get_api_answer(self.cursor).await?;

        if let Some(current_date) = response.get("current_date").and_then(|v| v.as_i64()) {
            self.cursor = self.cursor.max(current_date);
        }

        let homework = check_response(&response)?;
        parse_status(homework, &self.verdicts)
    }

    /// Run one fetch/validate/notify cycle. Never returns an error: failures
    /// are logged and reported to the chat.
    #[tracing::instrument(skip(self), fields(cursor = self.cursor))]
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.fetch_status().await {
            Ok(message) => {
                if self.last_message.as_deref() == Some(message.as_str()) {
                    tracing::debug!("Homework status unchanged");
                    return CycleOutcome::Unchanged;
                }

                tracing::info!("{}", message);
                if send_message(self.notifier.as_ref(), &message).await {
                    self.last_message = Some(message.clone());
                    CycleOutcome::Notified(message)
                } else {
                    CycleOutcome::DeliveryFailed(message)
                }
            }
            Err(e) => {
                let notice = format!("{}: {}", FAILURE_PREFIX, e);
                tracing::error!(kind = %e.kind(), "{}", notice);
                send_message(self.notifier.as_ref(), &notice).await;
                CycleOutcome::Failed(notice)
            }
        }
    }

    /// Poll until the cancellation token is triggered
    pub async fn run(&mut self, cancel: CancellationToken) {
        tracing::info!(
            "Polling every {}s starting from {}",
            self.retry_period.as_secs(),
            self.cursor
        );

        loop {
            tokio::select! {
                biased;
                outcome = self.run_cycle() => {
                    tracing::debug!("Cycle finished: {:?}", outcome);
                }
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled during a cycle");
                    break;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }
}

/// Current Unix time in seconds
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
