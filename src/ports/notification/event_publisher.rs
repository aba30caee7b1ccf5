use crate::domain::models::ImageEvent;
use async_trait::async_trait;

/// Receives the events collected during one use-case call
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    async fn publish(&self, events: Vec<ImageEvent>);
}
