use axum::{
    routing::{get, post},
    Router,
};
use std::{path::PathBuf, sync::Arc};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use super::{
    handlers::{
        delete_image, get_image, health, image_exists, list_images_by_type, upload_images,
    },
    middleware::{body_limit_layer, cors_layer, trace_layer, DEFAULT_MAX_UPLOAD_BYTES},
};
use crate::ports::services::ImageService;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub image_service: Arc<dyn ImageService>,
}

impl AppState {
    pub fn new(image_service: Arc<dyn ImageService>) -> Self {
        Self { image_service }
    }
}

/// Router settings that do not belong to the use cases
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Directory served under `/images` (local storage only)
    pub static_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            static_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Create the image API routes, mounted under `/api/v1`
pub fn create_image_router() -> Router<AppState> {
    Router::new()
        .route(
            "/images",
            post(upload_images).delete(delete_image).get(get_image),
        )
        .route("/images/exists", get(image_exists))
        .route("/images/types/{image_type}", get(list_images_by_type))
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState, config: &RouterConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", create_image_router());

    if let Some(dir) = &config.static_dir {
        router = router.nest_service("/images", ServeDir::new(dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer())
                .layer(cors_layer())
                .layer(body_limit_layer(config.max_upload_bytes)),
        )
        .with_state(state)
}
