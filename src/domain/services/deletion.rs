use crate::domain::{
    errors::{ImageError, ImageResult},
    models::Image,
};

const IMAGES_MARKER: &str = "/images/";

/// Rules for soft-deleting images and replacing stored paths
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDeletionService;

impl ImageDeletionService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_image_can_be_deleted(&self, image: &Image) -> ImageResult<()> {
        if image.is_deleted() {
            return Err(ImageError::AlreadyDeleted {
                path: image.path().as_str().to_string(),
            });
        }
        Ok(())
    }

    /// True when a previous path exists, is non-blank and differs from the new one
    pub fn should_delete_previous_image(&self, previous: Option<&str>, new: Option<&str>) -> bool {
        match previous {
            Some(previous) if !previous.trim().is_empty() => Some(previous) != new,
            _ => false,
        }
    }

    /// The part of `full_url` after the first `/images/`.
    ///
    /// Inputs without the marker are returned unchanged.
    pub fn extract_image_path_from_url<'a>(&self, full_url: &'a str) -> &'a str {
        match full_url.find(IMAGES_MARKER) {
            Some(idx) => &full_url[idx + IMAGES_MARKER.len()..],
            None => full_url,
        }
    }

    pub fn mark_image_as_deleted(&self, image: &mut Image) -> ImageResult<()> {
        self.validate_image_can_be_deleted(image)?;
        image.delete()
    }
}
