mod event_notifier;
mod image_service_impl;

pub use event_notifier::{delete_failure_message, ImageEventNotifier};
pub use image_service_impl::{ImageServiceBuilder, ImageServiceImpl, DEFAULT_PUBLIC_BASE_URL};
