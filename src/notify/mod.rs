//! Best-effort push notifications.
//!
//! Tool handlers call `Notifier::notify`, which hands the text to a detached
//! task and returns immediately. Delivery failures are logged and dropped.

pub mod pushover;

pub use pushover::PushoverSink;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PushoverConfig;
use crate::error::NotifyError;

/// A destination for short text notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Sink used when no push credentials are configured.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        tracing::info!(notification = %text, "Notification (no push credentials configured)");
        Ok(())
    }
}

/// Fire-and-forget front for a `NotificationSink`.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Pushover when credentials exist, otherwise log-only.
    pub fn from_config(config: Option<PushoverConfig>) -> Self {
        match config {
            Some(config) => {
                tracing::info!("Push notifications: Pushover");
                Self::new(Arc::new(PushoverSink::new(config)))
            }
            None => {
                tracing::info!("Push notifications: disabled (PUSHOVER_TOKEN/PUSHOVER_USER not set)");
                Self::new(Arc::new(LogSink))
            }
        }
    }

    /// Queue `text` for delivery. Never blocks on, or reports, the outcome.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, text: impl Into<String>) {
        let sink = Arc::clone(&self.sink);
        let text = text.into();
        tokio::spawn(async move {
            if let Err(e) = sink.send(&text).await {
                tracing::warn!(sink = sink.name(), error = %e, "Notification delivery failed");
            }
        });
    }
}
