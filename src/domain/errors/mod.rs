mod image_errors;
mod validation_errors;

pub use image_errors::*;
pub use validation_errors::*;
