mod event_publisher;
mod webhook;

pub use event_publisher::EventPublisher;
pub use webhook::{Embed, EmbedField, WebhookMessage, WebhookSender};
