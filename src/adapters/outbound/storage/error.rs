use crate::domain::errors::StorageFailure;
use std::io;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Convert into the domain failure for a write of `path`
    pub fn upload_failure(self, path: impl Into<String>) -> StorageFailure {
        StorageFailure::UploadFailed {
            path: path.into(),
            message: self.to_string(),
        }
    }

    /// Convert into the domain failure for a removal of `path`
    pub fn delete_failure(self, path: impl Into<String>) -> StorageFailure {
        StorageFailure::DeleteFailed {
            path: path.into(),
            message: self.to_string(),
        }
    }
}
