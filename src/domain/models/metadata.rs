use chrono::{DateTime, Duration, Utc};

use super::ImageType;

/// Descriptive attributes of a stored image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetadata {
    pub image_type: ImageType,
    pub original_file_name: Option<String>,
    pub file_size: Option<u64>,
    pub content_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageMetadata {
    /// Metadata carrying only the image type
    pub fn of(image_type: ImageType) -> Self {
        Self::with_file_info(image_type, None, None, None)
    }

    pub fn with_file_info(
        image_type: ImageType,
        original_file_name: Option<String>,
        file_size: Option<u64>,
        content_type: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            image_type,
            original_file_name,
            file_size,
            content_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild metadata loaded from storage
    pub fn restore(
        image_type: ImageType,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            image_type,
            original_file_name: None,
            file_size: None,
            content_type: None,
            created_at,
            updated_at,
        }
    }

    /// Refresh `updated_at`. The new value is always strictly later than the
    /// previous one, even when the clock has not advanced.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}
