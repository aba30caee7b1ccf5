mod image_repository;

pub use image_repository::ImageRepository;
