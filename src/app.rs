use axum::Router;
use object_store::memory::InMemory;
use sqlx::postgres::PgPoolOptions;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::info;

use crate::{
    adapters::{
        inbound::http::{create_router, AppState, RouterConfig, DEFAULT_MAX_UPLOAD_BYTES},
        outbound::{
            notification::{DiscordWebhook, LoggingWebhook},
            persistence::{InMemoryImageRepository, SqlImageRepository},
            storage::{create_s3_store, LocalFileStorage, ObjectStoreFileStorage, S3Config},
        },
    },
    ports::{
        notification::WebhookSender, repositories::ImageRepository, storage::FileStorage,
    },
    services::{ImageEventNotifier, ImageServiceBuilder, ImageServiceImpl, DEFAULT_PUBLIC_BASE_URL},
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    pub notifier_backend: NotifierBackend,
    /// Base URL prepended to relative image URLs
    pub public_base_url: String,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            notifier_backend: NotifierBackend::Logging,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    Local {
        directory: PathBuf,
    },
    S3 {
        bucket: String,
        region: String,
        access_key: Option<String>,
        secret_key: Option<String>,
        endpoint: Option<String>,
        /// Public URL of the bucket, derived from bucket and region when absent
        public_url: Option<String>,
    },
}

/// Repository backend configuration
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    Database { connection_string: String },
}

/// Where failure notifications go
#[derive(Debug, Clone)]
pub enum NotifierBackend {
    Logging,
    Discord { webhook_url: String },
}

/// Application dependencies container
pub struct AppDependencies {
    pub image_repository: Arc<dyn ImageRepository>,
    pub file_storage: Arc<dyn FileStorage>,
    pub webhook: Arc<dyn WebhookSender>,
}

/// Application services container
pub struct AppServices {
    pub image_service: ImageServiceImpl,
    pub router_config: RouterConfig,
}

impl AppServices {
    /// HTTP router serving the image API
    pub fn router(&self) -> Router {
        let state = AppState::new(Arc::new(self.image_service.clone()));
        create_router(state, &self.router_config)
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Configure notification backend
    pub fn with_notifier_backend(mut self, backend: NotifierBackend) -> Self {
        self.config.notifier_backend = backend;
        self
    }

    pub fn with_public_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.config.public_base_url = public_base_url.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.config.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        Ok(AppDependencies {
            image_repository: self.create_repository().await?,
            file_storage: self.create_storage()?,
            webhook: self.create_webhook(),
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let image_service = ImageServiceBuilder::new()
            .repository(deps.image_repository)
            .storage(deps.file_storage)
            .publisher(Arc::new(ImageEventNotifier::new(deps.webhook)))
            .public_base_url(self.config.public_base_url.clone())
            .build()
            .map_err(|message| AppError::ServiceInit {
                message: message.to_string(),
            })?;

        let static_dir = match &self.config.storage_backend {
            StorageBackend::Local { directory } => Some(directory.clone()),
            _ => None,
        };

        Ok(AppServices {
            image_service,
            router_config: RouterConfig {
                static_dir,
                max_upload_bytes: self.config.max_upload_bytes,
            },
        })
    }

    /// Create the storage adapter based on configuration
    fn create_storage(&self) -> Result<Arc<dyn FileStorage>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => {
                let store = Arc::new(InMemory::new());
                Ok(Arc::new(ObjectStoreFileStorage::new(
                    store,
                    self.config.public_base_url.clone(),
                )))
            }
            StorageBackend::Local { directory } => {
                let storage = LocalFileStorage::new(directory)
                    .map_err(|e| AppError::StorageInit {
                        message: format!("{}: {}", directory.display(), e),
                    })?
                    .with_public_base_url(self.config.public_base_url.clone());
                Ok(Arc::new(storage))
            }
            StorageBackend::S3 {
                bucket,
                region,
                access_key,
                secret_key,
                endpoint,
                public_url,
            } => {
                let config = S3Config {
                    bucket: bucket.clone(),
                    region: region.clone(),
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                    endpoint: endpoint.clone(),
                };
                let store = create_s3_store(&config).map_err(|e| AppError::StorageInit {
                    message: format!("{:#}", e),
                })?;
                let public_url = public_url
                    .clone()
                    .unwrap_or_else(|| config.default_public_url());

                info!(bucket = %bucket, public_url = %public_url, "Using S3 image storage");
                Ok(Arc::new(ObjectStoreFileStorage::new(store, public_url)))
            }
        }
    }

    /// Create the repository based on configuration
    async fn create_repository(&self) -> Result<Arc<dyn ImageRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryImageRepository::new())),
            RepositoryBackend::Database { connection_string } => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .acquire_timeout(Duration::from_secs(5))
                    .connect(connection_string)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to connect to database: {}", e),
                    })?;

                let repository = SqlImageRepository::new(pool);
                repository
                    .migrate()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to migrate database: {}", e),
                    })?;

                Ok(Arc::new(repository))
            }
        }
    }

    fn create_webhook(&self) -> Arc<dyn WebhookSender> {
        match &self.config.notifier_backend {
            NotifierBackend::Logging => Arc::new(LoggingWebhook),
            NotifierBackend::Discord { webhook_url } => Arc::new(DiscordWebhook::new(webhook_url)),
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Create an application storing files under `directory`
pub async fn create_local_app(directory: impl Into<PathBuf>) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::Local {
            directory: directory.into(),
        })
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

fn required_env(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::Configuration {
        message: format!("{} environment variable required", name),
    })
}

/// Read the application configuration from environment variables
pub fn config_from_env() -> Result<AppConfig, AppError> {
    let storage_backend = match std::env::var("STORAGE_BACKEND").as_deref() {
        Ok("s3") => StorageBackend::S3 {
            bucket: required_env("S3_BUCKET")?,
            region: required_env("S3_REGION")?,
            access_key: std::env::var("S3_ACCESS_KEY").ok(),
            secret_key: std::env::var("S3_SECRET_KEY").ok(),
            endpoint: std::env::var("S3_ENDPOINT").ok(),
            public_url: std::env::var("S3_PUBLIC_URL").ok(),
        },
        Ok("local") => StorageBackend::Local {
            directory: std::env::var("FILE_STORAGE_DIRECTORY")
                .unwrap_or_else(|_| "./uploads".to_string())
                .into(),
        },
        Ok("memory") | Err(_) => StorageBackend::InMemory,
        Ok(other) => {
            return Err(AppError::Configuration {
                message: format!("Unknown STORAGE_BACKEND: {}", other),
            })
        }
    };

    let repository_backend = match std::env::var("REPOSITORY_BACKEND").as_deref() {
        Ok("database") => RepositoryBackend::Database {
            connection_string: required_env("DATABASE_URL")?,
        },
        _ => RepositoryBackend::InMemory,
    };

    let notifier_backend = match std::env::var("DISCORD_WEBHOOK_URL") {
        Ok(webhook_url) if !webhook_url.trim().is_empty() => {
            NotifierBackend::Discord { webhook_url }
        }
        _ => NotifierBackend::Logging,
    };

    let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
        Ok(value) => value.parse().map_err(|_| AppError::Configuration {
            message: format!("Invalid MAX_UPLOAD_BYTES: {}", value),
        })?,
        Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
    };

    Ok(AppConfig {
        storage_backend,
        repository_backend,
        notifier_backend,
        public_base_url: std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
        max_upload_bytes,
    })
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(config_from_env()?)
        .build()
        .await
}
