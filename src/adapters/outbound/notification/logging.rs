use async_trait::async_trait;
use tracing::info;

use crate::ports::notification::{WebhookMessage, WebhookSender};

/// Webhook stand-in used when no webhook URL is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingWebhook;

#[async_trait]
impl WebhookSender for LoggingWebhook {
    async fn send(&self, message: &WebhookMessage) {
        let titles: Vec<&str> = message.embeds.iter().map(|e| e.title.as_str()).collect();
        info!(content = %message.content, ?titles, "Webhook not configured, message logged only");
    }
}
