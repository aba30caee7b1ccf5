use crate::domain::{
    errors::ImageResult,
    models::{Image, ImageType, UploadFile},
    value_objects::ImageId,
};
use async_trait::async_trait;

/// Port for image service operations
/// This trait defines the business logic for the image lifecycle
#[async_trait]
pub trait ImageService: Send + Sync + 'static {
    /// Validate, store and persist the files, returning their public URLs.
    /// An empty file list returns an empty result.
    async fn upload_images(
        &self,
        files: &[UploadFile],
        path_prefix: &str,
        image_type: ImageType,
    ) -> ImageResult<Vec<String>>;

    /// Remove the previous image when it is being replaced by a different one.
    /// Does nothing when `previous_path` is blank or equals `new_path`.
    async fn delete_image(
        &self,
        previous_path: Option<&str>,
        new_path: Option<&str>,
    ) -> ImageResult<()>;

    /// Get an image by its stored path
    async fn get_image_by_path(&self, path: &str) -> ImageResult<Image>;

    /// Get an image by id
    async fn get_image_by_id(&self, id: &ImageId) -> ImageResult<Image>;

    /// List images of a type
    async fn get_images_by_type(&self, image_type: ImageType) -> ImageResult<Vec<Image>>;

    /// Check if an image is stored under the path
    async fn exists_by_path(&self, path: &str) -> ImageResult<bool>;
}
