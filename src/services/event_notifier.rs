use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    domain::models::{FailureDetails, ImageEvent},
    ports::notification::{Embed, EmbedField, EventPublisher, WebhookMessage, WebhookSender},
};

/// Publishes image failure events: every event is logged, delete failures
/// are also relayed to the webhook
#[derive(Clone)]
pub struct ImageEventNotifier {
    webhook: Arc<dyn WebhookSender>,
}

impl ImageEventNotifier {
    pub fn new(webhook: Arc<dyn WebhookSender>) -> Self {
        Self { webhook }
    }
}

#[async_trait]
impl EventPublisher for ImageEventNotifier {
    async fn publish(&self, events: Vec<ImageEvent>) {
        for event in events {
            let details = event.details();
            warn!(
                event = event.name(),
                path = %details.image_path,
                cause = %details.cause,
                "{}",
                details.error_message
            );

            match &event {
                ImageEvent::DeleteFailed(details) => {
                    self.webhook.send(&delete_failure_message(details)).await;
                }
                ImageEvent::UploadFailed(_) => {
                    info!(event = event.name(), "Upload failure not relayed to webhook");
                }
            }
        }
    }
}

/// Webhook message describing a failed image delete
pub fn delete_failure_message(details: &FailureDetails) -> WebhookMessage {
    WebhookMessage {
        content: format!("Image delete failed: {}", details.image_path),
        embeds: vec![Embed {
            title: "Image delete failed".to_string(),
            fields: vec![
                EmbedField::new("Error message", details.error_message.clone(), false),
                EmbedField::new("Path", details.image_path.clone(), false),
                EmbedField::new(
                    "Exception",
                    format!("{}: {}", details.cause.kind(), details.cause.message()),
                    false,
                ),
                EmbedField::new("Timestamp", details.occurred_at.to_rfc3339(), true),
            ],
        }],
    }
}
