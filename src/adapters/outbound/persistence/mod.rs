mod in_memory_image_repository;
mod sql_image_repository;

pub use in_memory_image_repository::InMemoryImageRepository;
pub use sql_image_repository::SqlImageRepository;
