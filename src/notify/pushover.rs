//! Pushover message delivery.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::config::PushoverConfig;
use crate::error::NotifyError;
use crate::notify::NotificationSink;

/// Posts notifications to the Pushover messages API.
pub struct PushoverSink {
    config: PushoverConfig,
    client: reqwest::Client,
}

impl PushoverSink {
    pub fn new(config: PushoverConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationSink for PushoverSink {
    fn name(&self) -> &str {
        "pushover"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "token": self.config.token.expose_secret(),
            "user": self.config.user.expose_secret(),
            "message": text,
        });

        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }

        tracing::debug!("Pushover notification sent");
        Ok(())
    }
}
