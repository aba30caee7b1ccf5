use chrono::{DateTime, Utc};

use crate::domain::errors::StorageFailure;

/// What went wrong during a failed storage operation
#[derive(Debug, Clone, PartialEq)]
pub struct FailureDetails {
    pub error_message: String,
    pub image_path: String,
    pub cause: StorageFailure,
    pub occurred_at: DateTime<Utc>,
}

/// Events raised while running an image use case
#[derive(Debug, Clone, PartialEq)]
pub enum ImageEvent {
    UploadFailed(FailureDetails),
    DeleteFailed(FailureDetails),
}

impl ImageEvent {
    pub fn upload_failed(error_message: impl Into<String>, cause: StorageFailure) -> Self {
        ImageEvent::UploadFailed(Self::failure(error_message.into(), cause))
    }

    pub fn delete_failed(error_message: impl Into<String>, cause: StorageFailure) -> Self {
        ImageEvent::DeleteFailed(Self::failure(error_message.into(), cause))
    }

    fn failure(error_message: String, cause: StorageFailure) -> FailureDetails {
        FailureDetails {
            error_message,
            image_path: cause.path().to_string(),
            cause,
            occurred_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageEvent::UploadFailed(_) => "ImageUploadFailed",
            ImageEvent::DeleteFailed(_) => "ImageDeleteFailed",
        }
    }

    pub fn details(&self) -> &FailureDetails {
        match self {
            ImageEvent::UploadFailed(details) | ImageEvent::DeleteFailed(details) => details,
        }
    }
}
