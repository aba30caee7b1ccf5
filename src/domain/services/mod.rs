mod deletion;
mod processing;
mod validation;

pub use deletion::ImageDeletionService;
pub use processing::ImageProcessingService;
pub use validation::{ImageValidationService, ALLOWED_CONTENT_TYPES, DEFAULT_MAX_FILE_SIZE};
