use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::{ImageError, StorageFailure, ValidationError},
    models::{Image, ImageType},
};

/// DTO for the image delete request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageDto {
    #[serde(default)]
    pub image_directory: Option<String>,
    pub image_path: String,
}

/// Query string for image lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageQueryDto {
    pub image_path: Option<String>,
    pub image_id: Option<String>,
}

/// DTO for a stored image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: Option<String>,
    pub path: String,
    pub image_type: ImageType,
    pub status: String,
    pub original_file_name: Option<String>,
    pub file_size: Option<u64>,
    pub content_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for successful responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

// Conversion implementations

impl From<&Image> for ImageDto {
    fn from(image: &Image) -> Self {
        let metadata = image.metadata();
        ImageDto {
            id: image.id().map(|id| id.as_str().to_string()),
            path: image.path().as_str().to_string(),
            image_type: metadata.image_type,
            status: image.status().as_str().to_string(),
            original_file_name: metadata.original_file_name.clone(),
            file_size: metadata.file_size,
            content_type: metadata.content_type.clone(),
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            status: StatusCode::OK.as_u16(),
            message: "success".to_string(),
            data,
        }
    }
}

// Error response helpers

impl ErrorResponseDto {
    pub fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        ErrorResponseDto {
            status: status.as_u16(),
            error: error.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn from_image_error(error: &ImageError) -> Self {
        let code = match error {
            ImageError::Validation(ValidationError::NoFilesProvided) => "NoFilesProvided",
            ImageError::Validation(ValidationError::FileTooLarge { .. }) => "FileTooLarge",
            ImageError::Validation(ValidationError::UnsupportedFormat { .. }) => {
                "UnsupportedFormat"
            }
            ImageError::Validation(ValidationError::InvalidPathPrefix(_)) => "InvalidImagePath",
            ImageError::Validation(_) => "InvalidImage",
            ImageError::ImageNotFound { .. } | ImageError::ImageIdNotFound { .. } => {
                "ImageNotFound"
            }
            ImageError::AlreadyDeleted { .. } => "ImageAlreadyDeleted",
            ImageError::Storage(StorageFailure::UploadFailed { .. }) => "ImageUploadFailed",
            ImageError::Storage(StorageFailure::DeleteFailed { .. }) => "ImageDeleteFailed",
            ImageError::Persistence { .. } => "PersistenceError",
        };

        Self::new(StatusCode::from(error), code, error.to_string())
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequest", message)
    }
}
