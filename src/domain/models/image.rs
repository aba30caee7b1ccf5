use crate::domain::{
    errors::{ImageError, ImageResult, ValidationError},
    value_objects::{ImageId, ImagePath},
};

use super::ImageMetadata;

/// Lifecycle status of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageStatus {
    Normal,
    Deleted,
}

impl ImageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStatus::Normal => "NORMAL",
            ImageStatus::Deleted => "DELETED",
        }
    }
}

impl std::str::FromStr for ImageStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(ImageStatus::Normal),
            "DELETED" => Ok(ImageStatus::Deleted),
            _ => Err(ValidationError::UnknownImageStatus(s.to_string())),
        }
    }
}

/// Aggregate root for a stored image
///
/// `id` is `None` until a repository persists the image. Every state
/// transition refreshes `metadata.updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    id: Option<ImageId>,
    path: ImagePath,
    metadata: ImageMetadata,
    status: ImageStatus,
}

impl Image {
    /// A new, unsaved image in the `Normal` state
    pub fn create(path: ImagePath, metadata: ImageMetadata) -> Self {
        Self {
            id: None,
            path,
            metadata,
            status: ImageStatus::Normal,
        }
    }

    /// Reconstruct a persisted image as-is
    pub fn restore(
        id: ImageId,
        path: ImagePath,
        metadata: ImageMetadata,
        status: ImageStatus,
    ) -> Self {
        Self {
            id: Some(id),
            path,
            metadata,
            status,
        }
    }

    /// Attach the id assigned by the persistence layer
    pub fn with_id(mut self, id: ImageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Soft-delete the image. Deleting twice is rejected.
    pub fn delete(&mut self) -> ImageResult<()> {
        if self.is_deleted() {
            return Err(ImageError::AlreadyDeleted {
                path: self.path.as_str().to_string(),
            });
        }

        self.status = ImageStatus::Deleted;
        self.metadata.touch();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.status = ImageStatus::Normal;
        self.metadata.touch();
    }

    pub fn update_path(&mut self, new_path: ImagePath) {
        self.path = new_path;
        self.metadata.touch();
    }

    pub fn is_deleted(&self) -> bool {
        self.status == ImageStatus::Deleted
    }

    pub fn is_active(&self) -> bool {
        self.status == ImageStatus::Normal
    }

    pub fn id(&self) -> Option<&ImageId> {
        self.id.as_ref()
    }

    pub fn path(&self) -> &ImagePath {
        &self.path
    }

    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    pub fn status(&self) -> ImageStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ImageType;

    fn new_image() -> Image {
        Image::create(
            ImagePath::of("/images/test.jpg").unwrap(),
            ImageMetadata::of(ImageType::Profile),
        )
    }

    #[test]
    fn test_create_image() {
        let image = new_image();

        assert!(image.id().is_none());
        assert_eq!(image.path().as_str(), "/images/test.jpg");
        assert_eq!(image.metadata().image_type, ImageType::Profile);
        assert_eq!(image.status(), ImageStatus::Normal);
    }

    #[test]
    fn test_restore_image() {
        let id = ImageId::of("test-id").unwrap();
        let path = ImagePath::of("/images/test.jpg").unwrap();
        let metadata = ImageMetadata::of(ImageType::Post);

        let image = Image::restore(id.clone(), path.clone(), metadata.clone(), ImageStatus::Deleted);

        assert_eq!(image.id(), Some(&id));
        assert_eq!(image.path(), &path);
        assert_eq!(image.metadata(), &metadata);
        assert!(image.is_deleted());
    }

    #[test]
    fn test_delete_then_activate() {
        let mut image = new_image();
        let created_at = image.metadata().updated_at;

        image.delete().unwrap();
        assert!(image.is_deleted());
        assert!(!image.is_active());
        let deleted_at = image.metadata().updated_at;
        assert!(deleted_at > created_at);

        image.activate();
        assert!(!image.is_deleted());
        assert!(image.is_active());
        assert!(image.metadata().updated_at > deleted_at);
    }

    #[test]
    fn test_delete_twice_is_rejected() {
        let mut image = new_image();
        image.delete().unwrap();
        let updated_at = image.metadata().updated_at;

        let result = image.delete();

        assert_eq!(
            result,
            Err(ImageError::AlreadyDeleted {
                path: "/images/test.jpg".to_string()
            })
        );
        assert_eq!(image.metadata().updated_at, updated_at);
    }

    #[test]
    fn test_update_path() {
        let mut image = new_image();
        let before = image.metadata().updated_at;
        let new_path = ImagePath::of("/images/updated.jpg").unwrap();

        image.update_path(new_path.clone());

        assert_eq!(image.path(), &new_path);
        assert!(image.metadata().updated_at > before);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("NORMAL".parse::<ImageStatus>(), Ok(ImageStatus::Normal));
        assert_eq!("DELETED".parse::<ImageStatus>(), Ok(ImageStatus::Deleted));
        assert!("ARCHIVED".parse::<ImageStatus>().is_err());
    }
}
