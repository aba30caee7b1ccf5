use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Category of an uploaded image, which decides its storage prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageType {
    Profile,
    Post,
    JobPost,
}

impl ImageType {
    pub const ALL: [ImageType; 3] = [ImageType::Profile, ImageType::Post, ImageType::JobPost];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Profile => "PROFILE",
            ImageType::Post => "POST",
            ImageType::JobPost => "JOB_POST",
        }
    }

    /// Path prefix under which images of this type are stored
    pub fn path_prefix(&self) -> &'static str {
        match self {
            ImageType::Profile => "/images/profiles",
            ImageType::Post => "/images/posts",
            ImageType::JobPost => "/images/job-posts",
        }
    }
}

impl std::str::FromStr for ImageType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PROFILE" => Ok(ImageType::Profile),
            "POST" => Ok(ImageType::Post),
            "JOB_POST" => Ok(ImageType::JobPost),
            _ => Err(ValidationError::UnknownImageType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefixes() {
        assert_eq!(ImageType::Profile.path_prefix(), "/images/profiles");
        assert_eq!(ImageType::Post.path_prefix(), "/images/posts");
        assert_eq!(ImageType::JobPost.path_prefix(), "/images/job-posts");
    }

    #[test]
    fn test_parse_round_trips_through_as_str() {
        for image_type in ImageType::ALL {
            assert_eq!(image_type.as_str().parse::<ImageType>(), Ok(image_type));
        }
        assert_eq!("job_post".parse::<ImageType>(), Ok(ImageType::JobPost));
        assert!("AVATAR".parse::<ImageType>().is_err());
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_string(&ImageType::JobPost).unwrap();
        assert_eq!(json, "\"JOB_POST\"");
    }
}
