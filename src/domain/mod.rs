pub mod errors;
pub mod models;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use errors::{ImageError, ImageResult, StorageFailure, ValidationError};
pub use models::*;
pub use services::{ImageDeletionService, ImageProcessingService, ImageValidationService};
pub use value_objects::*;
