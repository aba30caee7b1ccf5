use super::ValidationError;

/// Failure reported by a storage backend while writing or removing bytes
#[derive(Debug, Clone, PartialEq)]
pub enum StorageFailure {
    /// Bytes could not be written
    UploadFailed { path: String, message: String },

    /// Bytes could not be removed
    DeleteFailed { path: String, message: String },
}

impl StorageFailure {
    /// Variant name, used when reporting the failure
    pub fn kind(&self) -> &'static str {
        match self {
            StorageFailure::UploadFailed { .. } => "UploadFailed",
            StorageFailure::DeleteFailed { .. } => "DeleteFailed",
        }
    }

    /// Storage key or path the failure relates to
    pub fn path(&self) -> &str {
        match self {
            StorageFailure::UploadFailed { path, .. } | StorageFailure::DeleteFailed { path, .. } => {
                path
            }
        }
    }

    /// Message of the underlying cause
    pub fn message(&self) -> &str {
        match self {
            StorageFailure::UploadFailed { message, .. }
            | StorageFailure::DeleteFailed { message, .. } => message,
        }
    }
}

impl std::fmt::Display for StorageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageFailure::UploadFailed { path, message } => {
                write!(f, "Image upload failed for '{}': {}", path, message)
            }
            StorageFailure::DeleteFailed { path, message } => {
                write!(f, "Image delete failed for '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for StorageFailure {}

/// Errors produced by image use cases
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Bad input: empty file, size, format, extension
    Validation(ValidationError),

    /// No image stored under the given path
    ImageNotFound { path: String },

    /// No image stored under the given id
    ImageIdNotFound { id: String },

    /// Image is already soft-deleted
    AlreadyDeleted { path: String },

    /// Storage backend failure
    Storage(StorageFailure),

    /// Repository failure
    Persistence { message: String },
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::Validation(err) => write!(f, "Validation error: {}", err),
            ImageError::ImageNotFound { path } => write!(f, "Image not found: {}", path),
            ImageError::ImageIdNotFound { id } => write!(f, "Image not found for id: {}", id),
            ImageError::AlreadyDeleted { path } => write!(f, "Image already deleted: {}", path),
            ImageError::Storage(err) => write!(f, "Storage error: {}", err),
            ImageError::Persistence { message } => write!(f, "Persistence error: {}", message),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Validation(err) => Some(err),
            ImageError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ImageError {
    fn from(err: ValidationError) -> Self {
        ImageError::Validation(err)
    }
}

impl From<StorageFailure> for ImageError {
    fn from(err: StorageFailure) -> Self {
        ImageError::Storage(err)
    }
}

/// Result type for image operations
pub type ImageResult<T> = Result<T, ImageError>;

/// Convert domain ImageError to HTTP status codes for API responses
impl From<&ImageError> for http::StatusCode {
    fn from(err: &ImageError) -> Self {
        match err {
            ImageError::Validation(_) => http::StatusCode::BAD_REQUEST,
            ImageError::ImageNotFound { .. } | ImageError::ImageIdNotFound { .. } => {
                http::StatusCode::NOT_FOUND
            }
            ImageError::AlreadyDeleted { .. } => http::StatusCode::CONFLICT,
            ImageError::Storage(_) | ImageError::Persistence { .. } => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
