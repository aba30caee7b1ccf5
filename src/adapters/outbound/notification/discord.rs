use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use crate::ports::notification::{WebhookMessage, WebhookSender};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts webhook messages to a Discord webhook URL.
///
/// Transport errors and non-success statuses are logged and dropped.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    client: Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl WebhookSender for DiscordWebhook {
    async fn send(&self, message: &WebhookMessage) {
        let response = match self.client.post(&self.url).json(message).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to send Discord message");
                return;
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Discord message delivered");
        } else {
            error!(
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or_default(),
                "Discord rejected message"
            );
        }
    }
}
