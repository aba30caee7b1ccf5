use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{ImageError, ImageResult},
        models::{Image, ImageType},
        value_objects::ImageId,
    },
    ports::repositories::ImageRepository,
};

/// In-memory implementation of ImageRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryImageRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    // Map of image id -> image
    images: HashMap<String, Image>,
    // Path index, mirrors the unique constraint on the SQL table
    paths: HashMap<String, String>,
}

impl RepositoryData {
    /// Check that `image` can be written without breaking path uniqueness
    fn check(&self, image: &Image) -> ImageResult<()> {
        let path = image.path().as_str();
        match (self.paths.get(path), image.id()) {
            (Some(owner), Some(id)) if owner == id.as_str() => Ok(()),
            (Some(_), _) => Err(ImageError::Persistence {
                message: format!("duplicate image path: {}", path),
            }),
            (None, _) => Ok(()),
        }
    }

    fn write(&mut self, image: &Image) -> Image {
        let stored = match image.id() {
            Some(_) => image.clone(),
            None => image.clone().with_id(ImageId::generate()),
        };
        let id = stored
            .id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default();

        // Drop the old path entry when the path changed
        if let Some(previous) = self.images.get(&id) {
            self.paths.remove(previous.path().as_str());
        }

        self.paths
            .insert(stored.path().as_str().to_string(), id.clone());
        self.images.insert(id, stored.clone());
        stored
    }
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn save(&self, image: &Image) -> ImageResult<Image> {
        let mut data = self.data.write().await;
        data.check(image)?;
        Ok(data.write(image))
    }

    async fn save_all(&self, images: &[Image]) -> ImageResult<Vec<Image>> {
        let mut data = self.data.write().await;

        // Validate the whole batch before touching state so a failure leaves
        // nothing behind
        let mut batch_paths = std::collections::HashSet::new();
        for image in images {
            data.check(image)?;
            if !batch_paths.insert(image.path().as_str()) {
                return Err(ImageError::Persistence {
                    message: format!("duplicate image path: {}", image.path()),
                });
            }
        }

        Ok(images.iter().map(|image| data.write(image)).collect())
    }

    async fn find_by_path(&self, path: &str) -> ImageResult<Option<Image>> {
        let data = self.data.read().await;
        Ok(data
            .paths
            .get(path)
            .and_then(|id| data.images.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &ImageId) -> ImageResult<Option<Image>> {
        let data = self.data.read().await;
        Ok(data.images.get(id.as_str()).cloned())
    }

    async fn find_by_type(&self, image_type: ImageType) -> ImageResult<Vec<Image>> {
        let data = self.data.read().await;
        let mut images: Vec<Image> = data
            .images
            .values()
            .filter(|image| image.metadata().image_type == image_type)
            .cloned()
            .collect();
        images.sort_by_key(|image| image.metadata().created_at);
        Ok(images)
    }

    async fn exists_by_path(&self, path: &str) -> ImageResult<bool> {
        let data = self.data.read().await;
        Ok(data.paths.contains_key(path))
    }
}
