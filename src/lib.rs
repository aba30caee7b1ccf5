pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Errors
    ImageError,
    ImageResult,
    StorageFailure,
    ValidationError,

    // Models
    FailureDetails,
    Image,
    ImageEvent,
    ImageMetadata,
    ImageStatus,
    ImageType,
    UploadFile,

    // Value objects
    ImageId,
    ImagePath,

    // Domain services
    ImageDeletionService,
    ImageProcessingService,
    ImageValidationService,
};

// Port types - interfaces for external systems
pub use ports::{
    EventPublisher, FileStorage, ImageRepository, ImageService, WebhookMessage, WebhookSender,
};

// Service implementations - business logic
pub use services::{ImageEventNotifier, ImageServiceBuilder, ImageServiceImpl};

// Application factory and configuration
pub use app::{
    config_from_env, create_app_from_env, create_in_memory_app, create_local_app, AppBuilder,
    AppConfig, AppDependencies, AppError, AppServices, NotifierBackend, RepositoryBackend,
    StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    notification::{DiscordWebhook, LoggingWebhook},
    persistence::{InMemoryImageRepository, SqlImageRepository},
    storage::{LocalFileStorage, ObjectStoreFileStorage},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, create_local_app, AppBuilder, AppServices, FileStorage, Image,
        ImageError, ImageId, ImageRepository, ImageService, ImageServiceImpl, ImageType,
        InMemoryImageRepository, LocalFileStorage, ObjectStoreFileStorage, UploadFile,
    };
}
