use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{ImageError, ImageResult},
        models::{Image, ImageEvent, ImageType, UploadFile},
        services::{ImageDeletionService, ImageProcessingService, ImageValidationService},
        value_objects::ImageId,
    },
    ports::{
        notification::EventPublisher, repositories::ImageRepository, services::ImageService,
        storage::FileStorage,
    },
};

/// Default base URL prepended to relative storage URLs
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Implementation of ImageService orchestrating validation, storage,
/// persistence and failure events
#[derive(Clone)]
pub struct ImageServiceImpl {
    repository: Arc<dyn ImageRepository>,
    storage: Arc<dyn FileStorage>,
    publisher: Arc<dyn EventPublisher>,
    validator: ImageValidationService,
    deletion: ImageDeletionService,
    processing: ImageProcessingService,
    public_base_url: String,
}

impl ImageServiceImpl {
    /// Create a new ImageServiceImpl instance
    pub fn new(
        repository: Arc<dyn ImageRepository>,
        storage: Arc<dyn FileStorage>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            storage,
            publisher,
            validator: ImageValidationService::new(),
            deletion: ImageDeletionService::new(),
            processing: ImageProcessingService::new(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }

    pub fn with_public_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.public_base_url = public_base_url.into();
        self
    }

    pub fn with_validator(mut self, validator: ImageValidationService) -> Self {
        self.validator = validator;
        self
    }

    async fn store_and_persist(
        &self,
        files: &[UploadFile],
        path_prefix: &str,
        image_type: ImageType,
        events: &mut Vec<ImageEvent>,
    ) -> ImageResult<Vec<String>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        self.validator.validate_batch(files)?;
        self.validator.validate_path_prefix(path_prefix)?;

        let mut images = Vec::with_capacity(files.len());
        let mut urls = Vec::with_capacity(files.len());

        for file in files {
            let url = match self.storage.upload(file, path_prefix).await {
                Ok(url) => url,
                Err(failure) => {
                    events.push(ImageEvent::upload_failed(
                        format!("{} file upload failed", self.storage.name()),
                        failure.clone(),
                    ));
                    return Err(ImageError::Storage(failure));
                }
            };

            let full_path = self
                .processing
                .build_full_image_url(&self.public_base_url, &url);
            let image = self
                .processing
                .create_image_from_file(file, &full_path, image_type)?;

            debug!(path = %full_path, "Stored image file");
            images.push(image);
            urls.push(full_path);
        }

        self.repository.save_all(&images).await?;

        info!(
            count = urls.len(),
            image_type = %image_type,
            backend = self.storage.name(),
            "Uploaded images"
        );
        Ok(urls)
    }

    async fn remove_previous(
        &self,
        previous_path: Option<&str>,
        new_path: Option<&str>,
        events: &mut Vec<ImageEvent>,
    ) -> ImageResult<()> {
        let previous = match previous_path {
            Some(previous)
                if self
                    .deletion
                    .should_delete_previous_image(Some(previous), new_path) =>
            {
                previous
            }
            _ => {
                debug!(?previous_path, ?new_path, "Previous image kept");
                return Ok(());
            }
        };

        if let Err(failure) = self.storage.delete(previous).await {
            events.push(ImageEvent::delete_failed(
                format!("{} file delete failed", self.storage.name()),
                failure.clone(),
            ));
            return Err(ImageError::Storage(failure));
        }

        let mut image = self.get_image_by_path(previous).await?;
        self.deletion.mark_image_as_deleted(&mut image)?;
        self.repository.save(&image).await?;

        info!(path = %previous, file = image.path().file_name(), "Deleted image");
        Ok(())
    }

    async fn flush(&self, events: Vec<ImageEvent>) {
        if !events.is_empty() {
            warn!(count = events.len(), "Publishing image failure events");
        }
        self.publisher.publish(events).await;
    }
}

#[async_trait]
impl ImageService for ImageServiceImpl {
    async fn upload_images(
        &self,
        files: &[UploadFile],
        path_prefix: &str,
        image_type: ImageType,
    ) -> ImageResult<Vec<String>> {
        let mut events = Vec::new();
        let result = self
            .store_and_persist(files, path_prefix, image_type, &mut events)
            .await;
        self.flush(events).await;
        result
    }

    async fn delete_image(
        &self,
        previous_path: Option<&str>,
        new_path: Option<&str>,
    ) -> ImageResult<()> {
        let mut events = Vec::new();
        let result = self
            .remove_previous(previous_path, new_path, &mut events)
            .await;
        self.flush(events).await;
        result
    }

    async fn get_image_by_path(&self, path: &str) -> ImageResult<Image> {
        self.repository
            .find_by_path(path)
            .await?
            .ok_or_else(|| ImageError::ImageNotFound {
                path: path.to_string(),
            })
    }

    async fn get_image_by_id(&self, id: &ImageId) -> ImageResult<Image> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ImageError::ImageIdNotFound { id: id.to_string() })
    }

    async fn get_images_by_type(&self, image_type: ImageType) -> ImageResult<Vec<Image>> {
        self.repository.find_by_type(image_type).await
    }

    async fn exists_by_path(&self, path: &str) -> ImageResult<bool> {
        self.repository.exists_by_path(path).await
    }
}

/// Builder for ImageServiceImpl
pub struct ImageServiceBuilder {
    repository: Option<Arc<dyn ImageRepository>>,
    storage: Option<Arc<dyn FileStorage>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    public_base_url: Option<String>,
    max_file_size: Option<u64>,
}

impl ImageServiceBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            storage: None,
            publisher: None,
            public_base_url: None,
            max_file_size: None,
        }
    }

    pub fn repository(mut self, repository: Arc<dyn ImageRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn public_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(public_base_url.into());
        self
    }

    pub fn max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = Some(max_file_size);
        self
    }

    pub fn build(self) -> Result<ImageServiceImpl, &'static str> {
        let repository = self.repository.ok_or("Repository is required")?;
        let storage = self.storage.ok_or("Storage is required")?;
        let publisher = self.publisher.ok_or("Event publisher is required")?;

        let mut service = ImageServiceImpl::new(repository, storage, publisher);
        if let Some(url) = self.public_base_url {
            service = service.with_public_base_url(url);
        }
        if let Some(max) = self.max_file_size {
            service =
                service.with_validator(ImageValidationService::new().with_max_file_size(max));
        }
        Ok(service)
    }
}

impl Default for ImageServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::persistence::InMemoryImageRepository,
        domain::{
            errors::{StorageFailure, ValidationError},
            models::{ImageMetadata, ImageStatus},
            value_objects::ImagePath,
        },
    };
    use tokio::sync::Mutex;

    /// Storage double that records calls and can be told to fail
    #[derive(Default)]
    struct RecordingStorage {
        uploads: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
        fail_upload_at: Option<usize>,
        fail_delete: bool,
    }

    #[async_trait]
    impl FileStorage for RecordingStorage {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn upload(
            &self,
            file: &UploadFile,
            path_prefix: &str,
        ) -> Result<String, StorageFailure> {
            let mut uploads = self.uploads.lock().await;
            let name = file.file_name.clone().unwrap_or_default();
            if self.fail_upload_at == Some(uploads.len()) {
                return Err(StorageFailure::UploadFailed {
                    path: format!("{}/{}", path_prefix, name),
                    message: "I/O error".to_string(),
                });
            }
            uploads.push(name.clone());
            Ok(format!("/images/{}/{}", path_prefix, name))
        }

        async fn delete(&self, path: &str) -> Result<(), StorageFailure> {
            self.deletes.lock().await.push(path.to_string());
            if self.fail_delete {
                return Err(StorageFailure::DeleteFailed {
                    path: path.to_string(),
                    message: "permission denied".to_string(),
                });
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        calls: Mutex<Vec<Vec<ImageEvent>>>,
    }

    impl RecordingPublisher {
        async fn events(&self) -> Vec<ImageEvent> {
            self.calls.lock().await.iter().flatten().cloned().collect()
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, events: Vec<ImageEvent>) {
            self.calls.lock().await.push(events);
        }
    }

    struct Fixture {
        service: ImageServiceImpl,
        repository: Arc<InMemoryImageRepository>,
        storage: Arc<RecordingStorage>,
        publisher: Arc<RecordingPublisher>,
    }

    fn fixture(storage: RecordingStorage) -> Fixture {
        let repository = Arc::new(InMemoryImageRepository::new());
        let storage = Arc::new(storage);
        let publisher = Arc::new(RecordingPublisher::default());
        let service = ImageServiceBuilder::new()
            .repository(repository.clone())
            .storage(storage.clone())
            .publisher(publisher.clone())
            .public_base_url("http://localhost:8080")
            .build()
            .unwrap();

        Fixture {
            service,
            repository,
            storage,
            publisher,
        }
    }

    fn jpeg(name: &str) -> UploadFile {
        UploadFile::builder()
            .file_name(name)
            .content_type("image/jpeg")
            .data(b"test content".to_vec())
            .build()
    }

    fn png(name: &str) -> UploadFile {
        UploadFile::builder()
            .file_name(name)
            .content_type("image/png")
            .data(b"png content".to_vec())
            .build()
    }

    async fn seed(repository: &InMemoryImageRepository, path: &str) -> Image {
        let image = Image::create(
            ImagePath::of(path).unwrap(),
            ImageMetadata::of(ImageType::Post),
        );
        repository.save(&image).await.unwrap()
    }

    #[tokio::test]
    async fn test_upload_two_files() {
        let fx = fixture(RecordingStorage::default());

        let urls = fx
            .service
            .upload_images(&[jpeg("a.jpg"), png("b.png")], "posts", ImageType::Post)
            .await
            .unwrap();

        assert_eq!(
            urls,
            vec![
                "http://localhost:8080/images/posts/a.jpg".to_string(),
                "http://localhost:8080/images/posts/b.png".to_string(),
            ]
        );

        let stored = fx.repository.find_by_type(ImageType::Post).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|image| image.status() == ImageStatus::Normal));
        assert!(stored.iter().all(|image| image.id().is_some()));
        assert!(fx.publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_empty_list_returns_empty() {
        let fx = fixture(RecordingStorage::default());

        let urls = fx
            .service
            .upload_images(&[], "posts", ImageType::Profile)
            .await
            .unwrap();

        assert!(urls.is_empty());
        assert!(fx.storage.uploads.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_file_before_storing() {
        let fx = fixture(RecordingStorage::default());
        let text = UploadFile::builder()
            .file_name("notes.txt")
            .content_type("text/plain")
            .data(b"hello".to_vec())
            .build();

        let result = fx
            .service
            .upload_images(&[jpeg("a.jpg"), text], "posts", ImageType::Post)
            .await;

        assert!(matches!(
            result,
            Err(ImageError::Validation(ValidationError::UnsupportedFormat { .. }))
        ));
        assert!(fx.storage.uploads.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_escaping_prefix() {
        let fx = fixture(RecordingStorage::default());

        let result = fx
            .service
            .upload_images(&[jpeg("a.jpg")], "images/../../x", ImageType::Post)
            .await;

        assert!(matches!(
            result,
            Err(ImageError::Validation(ValidationError::InvalidPathPrefix(_)))
        ));
        assert!(fx.storage.uploads.lock().await.is_empty());
        assert!(fx.publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_storage_failure_records_one_event() {
        let fx = fixture(RecordingStorage {
            fail_upload_at: Some(0),
            ..Default::default()
        });

        let result = fx
            .service
            .upload_images(&[jpeg("a.jpg")], "posts", ImageType::Post)
            .await;

        assert!(matches!(
            result,
            Err(ImageError::Storage(StorageFailure::UploadFailed { .. }))
        ));

        let events = fx.publisher.events().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ImageEvent::UploadFailed(_)));
        assert_eq!(events[0].details().image_path, "posts/a.jpg");
        assert!(fx.repository.find_by_type(ImageType::Post).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_midway_persists_nothing() {
        let fx = fixture(RecordingStorage {
            fail_upload_at: Some(1),
            ..Default::default()
        });

        let result = fx
            .service
            .upload_images(&[jpeg("a.jpg"), png("b.png")], "posts", ImageType::Post)
            .await;

        assert!(result.is_err());
        assert_eq!(fx.storage.uploads.lock().await.len(), 1);
        assert!(fx.repository.find_by_type(ImageType::Post).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_previous_image() {
        let fx = fixture(RecordingStorage::default());
        seed(&fx.repository, "/images/old.jpg").await;

        fx.service
            .delete_image(Some("/images/old.jpg"), Some("/images/new.jpg"))
            .await
            .unwrap();

        assert_eq!(
            *fx.storage.deletes.lock().await,
            vec!["/images/old.jpg".to_string()]
        );
        let image = fx.service.get_image_by_path("/images/old.jpg").await.unwrap();
        assert_eq!(image.status(), ImageStatus::Deleted);
        assert!(fx.publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_same_or_missing_path_is_noop() {
        let fx = fixture(RecordingStorage::default());

        fx.service
            .delete_image(Some("/images/same.jpg"), Some("/images/same.jpg"))
            .await
            .unwrap();
        fx.service
            .delete_image(None, Some("/images/new.jpg"))
            .await
            .unwrap();
        fx.service
            .delete_image(Some("  "), Some("/images/new.jpg"))
            .await
            .unwrap();

        assert!(fx.storage.deletes.lock().await.is_empty());
        assert!(fx.publisher.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_image_is_not_found() {
        let fx = fixture(RecordingStorage::default());

        let result = fx
            .service
            .delete_image(Some("/images/missing.jpg"), None)
            .await;

        assert_eq!(
            result,
            Err(ImageError::ImageNotFound {
                path: "/images/missing.jpg".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_delete_already_deleted_image_conflicts() {
        let fx = fixture(RecordingStorage::default());
        seed(&fx.repository, "/images/old.jpg").await;
        fx.service
            .delete_image(Some("/images/old.jpg"), None)
            .await
            .unwrap();

        let result = fx.service.delete_image(Some("/images/old.jpg"), None).await;

        assert!(matches!(result, Err(ImageError::AlreadyDeleted { .. })));
    }

    #[tokio::test]
    async fn test_delete_storage_failure_records_event() {
        let fx = fixture(RecordingStorage {
            fail_delete: true,
            ..Default::default()
        });
        let stored = seed(&fx.repository, "/images/old.jpg").await;

        let result = fx.service.delete_image(Some("/images/old.jpg"), None).await;

        assert!(matches!(
            result,
            Err(ImageError::Storage(StorageFailure::DeleteFailed { .. }))
        ));
        let events = fx.publisher.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "ImageDeleteFailed");

        let image = fx
            .service
            .get_image_by_id(stored.id().unwrap())
            .await
            .unwrap();
        assert!(image.is_active());
    }

    #[tokio::test]
    async fn test_queries() {
        let fx = fixture(RecordingStorage::default());
        let stored = seed(&fx.repository, "/images/posts/a.jpg").await;

        assert!(fx.service.exists_by_path("/images/posts/a.jpg").await.unwrap());
        assert!(!fx.service.exists_by_path("/images/posts/b.jpg").await.unwrap());
        assert_eq!(
            fx.service.get_images_by_type(ImageType::Post).await.unwrap().len(),
            1
        );
        assert!(fx
            .service
            .get_images_by_type(ImageType::Profile)
            .await
            .unwrap()
            .is_empty());

        let by_id = fx
            .service
            .get_image_by_id(stored.id().unwrap())
            .await
            .unwrap();
        assert_eq!(by_id.path(), stored.path());

        let missing = ImageId::of("not-found-id").unwrap();
        assert!(matches!(
            fx.service.get_image_by_id(&missing).await,
            Err(ImageError::ImageIdNotFound { .. })
        ));
    }

    #[test]
    fn test_builder_requires_dependencies() {
        assert!(ImageServiceBuilder::new().build().is_err());
    }
}
