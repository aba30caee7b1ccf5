use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Discord-compatible webhook payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

/// Outbound webhook delivery.
///
/// Implementations never return errors: delivery failures are logged and
/// dropped so callers are unaffected by the health of the receiver.
#[async_trait]
pub trait WebhookSender: Send + Sync + 'static {
    async fn send(&self, message: &WebhookMessage);
}
