pub mod notification;
pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use notification::{Embed, EmbedField, EventPublisher, WebhookMessage, WebhookSender};
pub use repositories::ImageRepository;
pub use services::ImageService;
pub use storage::FileStorage;
