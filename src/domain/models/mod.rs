pub mod events;
pub mod image;
pub mod image_type;
pub mod metadata;
pub mod upload_file;

pub use events::{FailureDetails, ImageEvent};
pub use image::{Image, ImageStatus};
pub use image_type::ImageType;
pub use metadata::ImageMetadata;
pub use upload_file::UploadFile;
