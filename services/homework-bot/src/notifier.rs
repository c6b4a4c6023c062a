//! Notifier trait and best-effort delivery

use async_trait::async_trait;

/// Trait for delivering a text message to the configured chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a text message
    async fn notify(&self, text: &str) -> crate::Result<()>;
}

/// Deliver `text` and report whether it arrived. Failures are logged, never
/// returned, and never retried here.
#[tracing::instrument(skip_all, fields(notifier = notifier.type_name()))]
pub async fn send_message(notifier: &dyn Notifier, text: &str) -> bool {
    match notifier.notify(text).await {
        Ok(()) => {
            tracing::debug!("Message delivered via {}", notifier.type_name());
            true
        }
        Err(e) => {
            tracing::error!(
                kind = %e.kind(),
                "Failed to send message via {}: {}",
                notifier.type_name(),
                e
            );
            false
        }
    }
}
