mod image_id;
mod image_path;

pub use image_id::ImageId;
pub use image_path::{ImagePath, ALLOWED_IMAGE_EXTENSIONS};
