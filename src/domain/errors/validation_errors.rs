/// Validation errors for incoming files and domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Upload validation errors
    InvalidFile,
    FileTooLarge {
        size: u64,
        max: u64,
    },
    UnsupportedFormat {
        value: Option<String>,
    },
    NoFilesProvided,
    InvalidPathPrefix(String),

    // ImagePath validation errors
    BlankImagePath,
    UnsupportedImageExtension(String),

    // ImageId validation errors
    EmptyImageId,

    // Enum parsing errors
    UnknownImageType(String),
    UnknownImageStatus(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidFile => write!(f, "Invalid image file: file is empty"),
            ValidationError::FileTooLarge { size, max } => {
                write!(f, "Image file too large: {} bytes (max: {})", size, max)
            }
            ValidationError::UnsupportedFormat { value: Some(value) } => {
                write!(f, "Unsupported image format: '{}'", value)
            }
            ValidationError::UnsupportedFormat { value: None } => {
                write!(f, "Unsupported image format: missing content type or extension")
            }
            ValidationError::NoFilesProvided => write!(f, "No files provided"),
            ValidationError::InvalidPathPrefix(prefix) => {
                write!(f, "Image path must not contain '.' or '..' segments: '{}'", prefix)
            }

            ValidationError::BlankImagePath => write!(f, "Image path cannot be blank"),
            ValidationError::UnsupportedImageExtension(path) => {
                write!(
                    f,
                    "Image path must end with .jpg, .jpeg, .png, .gif or .webp: '{}'",
                    path
                )
            }

            ValidationError::EmptyImageId => write!(f, "Image ID cannot be empty"),

            ValidationError::UnknownImageType(value) => {
                write!(f, "Unknown image type: '{}'", value)
            }
            ValidationError::UnknownImageStatus(value) => {
                write!(f, "Unknown image status: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
