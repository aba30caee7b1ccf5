pub mod image_handlers;

pub use image_handlers::*;
