use anyhow::{Context, Result};
use clap::Parser;
use image_store_server::{
    app::{AppBuilder, AppConfig, NotifierBackend, RepositoryBackend, StorageBackend},
    services::DEFAULT_PUBLIC_BASE_URL,
};
use std::{net::SocketAddr, path::PathBuf};
use tokio::net::TcpListener;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "image-store-server")]
#[command(about = "Image upload and lifecycle server", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type: local, s3 or memory
    #[arg(long, env = "STORAGE_BACKEND", default_value = "local")]
    storage_backend: String,

    /// Root directory for the local storage backend
    #[arg(long, env = "FILE_STORAGE_DIRECTORY", default_value = "./uploads")]
    file_storage_directory: PathBuf,

    /// Base URL prepended to relative image URLs
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = DEFAULT_PUBLIC_BASE_URL)]
    public_base_url: String,

    /// Repository backend type: memory or database
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// S3 endpoint URL (for S3-compatible services)
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 bucket name
    #[arg(long, env = "S3_BUCKET")]
    s3_bucket: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Public URL of the S3 bucket
    #[arg(long, env = "S3_PUBLIC_URL")]
    s3_public_url: Option<String>,

    /// Database URL for repository backend (PostgreSQL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Discord webhook receiving delete failure notifications
    #[arg(long, env = "DISCORD_WEBHOOK_URL")]
    discord_webhook_url: Option<String>,

    /// Maximum request body size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 50 * 1024 * 1024)]
    max_upload_bytes: usize,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "local" => StorageBackend::Local {
                directory: self.file_storage_directory.clone(),
            },
            "s3" => {
                let bucket = self
                    .s3_bucket
                    .clone()
                    .context("S3_BUCKET is required for S3 backend")?;

                StorageBackend::S3 {
                    bucket,
                    region: self.s3_region.clone(),
                    access_key: self.s3_access_key.clone(),
                    secret_key: self.s3_secret_key.clone(),
                    endpoint: self.s3_endpoint.clone(),
                    public_url: self.s3_public_url.clone(),
                }
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        let notifier_backend = match self.discord_webhook_url.as_deref() {
            Some(url) if !url.trim().is_empty() => NotifierBackend::Discord {
                webhook_url: url.to_string(),
            },
            _ => NotifierBackend::Logging,
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            notifier_backend,
            public_base_url: self.public_base_url.clone(),
            max_upload_bytes: self.max_upload_bytes,
        })
    }

    fn init_logging(&self) {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    info!(
        storage = %cli.storage_backend,
        repository = %cli.repository_backend,
        "Starting image store server"
    );

    let config = cli.to_app_config()?;
    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = app_services.router();

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("Invalid listen address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}
