// Infrastructure error types
pub mod error;

// Key generation shared by the backends
pub mod naming;

// Storage implementations
pub mod local;
pub mod object_store_storage;

// Provider-specific construction
pub mod s3;

// Re-export key types
pub use error::StoreError;
pub use local::LocalFileStorage;
pub use object_store_storage::ObjectStoreFileStorage;
pub use s3::{create_s3_store, S3Config};
