use crate::domain::{
    errors::ValidationError,
    models::UploadFile,
    value_objects::ALLOWED_IMAGE_EXTENSIONS,
};

/// Largest accepted upload: 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted for uploads, compared case-insensitively
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Pre-upload checks on incoming files
#[derive(Debug, Clone)]
pub struct ImageValidationService {
    max_file_size: u64,
}

impl ImageValidationService {
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Validate a single file.
    ///
    /// Checks run in order: emptiness, size, content type, extension.
    pub fn validate(&self, file: &UploadFile) -> Result<(), ValidationError> {
        if file.is_empty() {
            return Err(ValidationError::InvalidFile);
        }

        if file.size() > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max: self.max_file_size,
            });
        }

        let content_type_allowed = file.content_type.as_deref().is_some_and(|ct| {
            ALLOWED_CONTENT_TYPES
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ct.trim()))
        });
        if !content_type_allowed {
            return Err(ValidationError::UnsupportedFormat {
                value: file.content_type.clone(),
            });
        }

        let extension_allowed = file.extension().is_some_and(|ext| {
            ALLOWED_IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        });
        if !extension_allowed {
            return Err(ValidationError::UnsupportedFormat {
                value: file.file_name.clone(),
            });
        }

        Ok(())
    }

    /// Validate every file in order, stopping at the first failure
    pub fn validate_batch(&self, files: &[UploadFile]) -> Result<(), ValidationError> {
        if files.is_empty() {
            return Err(ValidationError::NoFilesProvided);
        }

        files.iter().try_for_each(|file| self.validate(file))
    }

    /// Reject upload prefixes with relative segments or backslashes
    pub fn validate_path_prefix(&self, prefix: &str) -> Result<(), ValidationError> {
        let relative = prefix
            .split('/')
            .any(|segment| matches!(segment.trim(), "." | ".."));
        if relative || prefix.contains('\\') {
            return Err(ValidationError::InvalidPathPrefix(prefix.to_string()));
        }
        Ok(())
    }
}

impl Default for ImageValidationService {
    fn default() -> Self {
        Self::new()
    }
}
