use crate::domain::errors::ValidationError;

/// Extensions accepted at the end of a stored image path
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// A validated reference to stored image bytes
///
/// The path is non-blank and ends with one of [`ALLOWED_IMAGE_EXTENSIONS`],
/// compared case-insensitively. Relative paths (`/images/posts/a.jpg`) and
/// full URLs (`http://host/images/posts/a.jpg`) are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePath(String);

impl ImagePath {
    pub fn of(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::BlankImagePath);
        }

        let lower = value.to_ascii_lowercase();
        let has_allowed_extension = ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext)));

        if !has_allowed_extension {
            return Err(ValidationError::UnsupportedImageExtension(value));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the file name part of the path (everything after the last '/')
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }
}

impl std::fmt::Display for ImagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
