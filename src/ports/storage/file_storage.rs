use crate::domain::{errors::StorageFailure, models::UploadFile};
use async_trait::async_trait;

/// Port for raw image byte storage
/// This abstracts the actual storage backend (local disk, S3, ...)
#[async_trait]
pub trait FileStorage: Send + Sync + 'static {
    /// Short backend name used in logs and failure messages
    fn name(&self) -> &'static str;

    /// Store the file under `path_prefix` with a randomized file name and
    /// return the URL it can be reached at
    async fn upload(&self, file: &UploadFile, path_prefix: &str) -> Result<String, StorageFailure>;

    /// Remove previously stored bytes. Blank paths are ignored.
    async fn delete(&self, path: &str) -> Result<(), StorageFailure>;
}
