use crate::domain::errors::ValidationError;

/// Identifier assigned to an image once it has been persisted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    /// Create a new ImageId, rejecting empty or whitespace-only values
    pub fn of(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyImageId);
        }

        Ok(Self(value))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_image_id() {
        assert!(ImageId::of("test-id").is_ok());
        assert!(ImageId::of("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(ImageId::of("42").is_ok());
    }

    #[test]
    fn test_invalid_image_id() {
        assert_eq!(ImageId::of(""), Err(ValidationError::EmptyImageId));
        assert_eq!(ImageId::of("   "), Err(ValidationError::EmptyImageId));
    }

    #[test]
    fn test_generate_image_id() {
        let a = ImageId::generate();
        let b = ImageId::generate();

        assert_ne!(a, b);
        assert!(ImageId::of(a.as_str()).is_ok());
    }
}
