use crate::domain::{
    errors::ImageResult,
    models::{Image, ImageType},
    value_objects::ImageId,
};
use async_trait::async_trait;

/// Repository for image aggregates
///
/// Saving an image without an id inserts it and returns the stored copy with
/// its newly assigned id. Saving an image with an id upserts: the row with that
/// id is updated, or inserted under that id when none exists.
#[async_trait]
pub trait ImageRepository: Send + Sync + 'static {
    /// Insert or update a single image
    async fn save(&self, image: &Image) -> ImageResult<Image>;

    /// Insert or update several images atomically: either every image is
    /// stored or none is
    async fn save_all(&self, images: &[Image]) -> ImageResult<Vec<Image>>;

    /// Find an image by its stored path
    async fn find_by_path(&self, path: &str) -> ImageResult<Option<Image>>;

    /// Find an image by id
    async fn find_by_id(&self, id: &ImageId) -> ImageResult<Option<Image>>;

    /// List images of a given type
    async fn find_by_type(&self, image_type: ImageType) -> ImageResult<Vec<Image>>;

    /// Check whether an image is stored under the given path
    async fn exists_by_path(&self, path: &str) -> ImageResult<bool>;
}
