use async_trait::async_trait;
use object_store::{
    path::Path as ObjectPath, Attribute, Attributes, ObjectStore, PutOptions, PutPayload,
};
use std::sync::Arc;
use tracing::debug;

use super::{
    error::StoreError,
    naming::{key_from_url, storage_key},
};
use crate::{
    domain::{errors::StorageFailure, models::UploadFile},
    ports::storage::FileStorage,
};

/// Stores image bytes in any `object_store` backend (S3, in-memory)
///
/// Objects are written under `images/{key}` and addressed as
/// `{public_base_url}/images/{key}`.
pub struct ObjectStoreFileStorage {
    inner: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl ObjectStoreFileStorage {
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: store,
            public_base_url,
        }
    }

    fn object_path(key: &str) -> ObjectPath {
        ObjectPath::from(format!("images/{}", key))
    }

    async fn put(&self, key: &str, file: &UploadFile) -> Result<(), StoreError> {
        let mut attributes = Attributes::new();
        if let Some(content_type) = &file.content_type {
            attributes.insert(Attribute::ContentType, content_type.clone().into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(
                &Self::object_path(key),
                PutPayload::from(file.data.clone()),
                options,
            )
            .await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let key = key_from_url(path, &self.public_base_url)?;

        match self.inner.delete(&Self::object_path(&key)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => {
                debug!(key = %key, "Removed image object");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FileStorage for ObjectStoreFileStorage {
    fn name(&self) -> &'static str {
        "object-store"
    }

    async fn upload(&self, file: &UploadFile, path_prefix: &str) -> Result<String, StorageFailure> {
        let key = storage_key(file, path_prefix).map_err(|e| e.upload_failure(path_prefix))?;

        self.put(&key, file)
            .await
            .map_err(|e| e.upload_failure(key.as_str()))?;

        debug!(key = %key, size = file.size(), "Stored image object");
        Ok(format!("{}/images/{}", self.public_base_url, key))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageFailure> {
        if path.trim().is_empty() {
            return Ok(());
        }

        self.remove(path).await.map_err(|e| e.delete_failure(path))
    }
}
