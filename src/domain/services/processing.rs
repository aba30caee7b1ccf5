use crate::domain::{
    errors::ValidationError,
    models::{Image, ImageMetadata, ImageType, UploadFile},
    value_objects::ImagePath,
};

/// Helpers for turning stored files into image aggregates
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProcessingService;

impl ImageProcessingService {
    pub fn new() -> Self {
        Self
    }

    pub fn create_image_from_file(
        &self,
        file: &UploadFile,
        stored_path: &str,
        image_type: ImageType,
    ) -> Result<Image, ValidationError> {
        let path = ImagePath::of(stored_path)?;
        let metadata = ImageMetadata::with_file_info(
            image_type,
            file.file_name.clone(),
            Some(file.size()),
            file.content_type.clone(),
        );
        Ok(Image::create(path, metadata))
    }

    /// Join a storage URL onto the public base URL.
    ///
    /// URLs that are already absolute are returned as they are.
    pub fn build_full_image_url(&self, base_url: &str, relative_path: &str) -> String {
        if relative_path.starts_with("http://") || relative_path.starts_with("https://") {
            return relative_path.to_string();
        }

        let base = base_url.trim_end_matches('/');
        if relative_path.starts_with('/') {
            format!("{}{}", base, relative_path)
        } else {
            format!("{}/{}", base, relative_path)
        }
    }

    pub fn generate_image_path_prefix(&self, image_type: ImageType) -> &'static str {
        image_type.path_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_image_from_file() {
        let file = UploadFile::builder()
            .file_name("test.jpg")
            .content_type("image/jpeg")
            .data(b"test content".to_vec())
            .build();

        let image = ImageProcessingService::new()
            .create_image_from_file(&file, "/images/stored/test.jpg", ImageType::Profile)
            .unwrap();

        assert!(image.id().is_none());
        assert_eq!(image.path().as_str(), "/images/stored/test.jpg");
        assert_eq!(image.metadata().image_type, ImageType::Profile);
        assert_eq!(image.metadata().original_file_name.as_deref(), Some("test.jpg"));
        assert_eq!(image.metadata().file_size, Some(12));
        assert_eq!(image.metadata().content_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_create_image_rejects_bad_path() {
        let file = UploadFile::builder().data(b"x".to_vec()).build();
        let result = ImageProcessingService::new().create_image_from_file(
            &file,
            "/images/stored/test.bmp",
            ImageType::Post,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_full_image_url() {
        let service = ImageProcessingService::new();

        assert_eq!(
            service.build_full_image_url("http://localhost:8080", "/images/test.jpg"),
            "http://localhost:8080/images/test.jpg"
        );
        assert_eq!(
            service.build_full_image_url("http://localhost:8080/", "images/test.jpg"),
            "http://localhost:8080/images/test.jpg"
        );
        assert_eq!(
            service.build_full_image_url(
                "http://localhost:8080",
                "https://bucket.s3.amazonaws.com/images/test.jpg"
            ),
            "https://bucket.s3.amazonaws.com/images/test.jpg"
        );
    }

    #[test]
    fn test_generate_image_path_prefix() {
        let service = ImageProcessingService::new();
        for image_type in ImageType::ALL {
            let prefix = service.generate_image_path_prefix(image_type);
            assert!(prefix.starts_with("/images/"));
        }
        assert_eq!(service.generate_image_path_prefix(ImageType::JobPost), "/images/job-posts");
    }
}
