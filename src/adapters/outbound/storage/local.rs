use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{
    error::StoreError,
    naming::{key_from_url, storage_key},
};
use crate::{
    domain::{errors::StorageFailure, models::UploadFile},
    ports::storage::FileStorage,
};

/// Stores image bytes on the local filesystem.
///
/// Files live at `root/{key}` and are addressed as `/images/{key}`, which is
/// where the HTTP router serves the root directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStorage {
    /// Create the storage, creating `root` if it does not exist
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        info!(root = %root.display(), "Local image storage ready");
        Ok(Self {
            root,
            public_base_url: String::new(),
        })
    }

    /// Base URL the service prefixes stored paths with, used to resolve
    /// full URLs back to keys on delete
    pub fn with_public_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.public_base_url = public_base_url.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn write(&self, key: &str, file: &UploadFile) -> Result<(), StoreError> {
        let target = self.root.join(key);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &file.data).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let key = key_from_url(path, &self.public_base_url)?;
        let target = self.root.join(&key);

        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!(key = %key, "Removed local image file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key = %key, "Local image file already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn upload(&self, file: &UploadFile, path_prefix: &str) -> Result<String, StorageFailure> {
        let key = storage_key(file, path_prefix).map_err(|e| e.upload_failure(path_prefix))?;

        self.write(&key, file)
            .await
            .map_err(|e| e.upload_failure(key.as_str()))?;

        debug!(key = %key, size = file.size(), "Wrote local image file");
        Ok(format!("/images/{}", key))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageFailure> {
        if path.trim().is_empty() {
            return Ok(());
        }

        self.remove(path).await.map_err(|e| e.delete_failure(path))
    }
}
