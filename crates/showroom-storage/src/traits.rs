//! Storage abstraction trait
//!
//! All storage backends must implement [`Storage`]. Callers treat the
//! returned URL as an opaque durable reference.

use async_trait::async_trait;
use showroom_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// `store` writes bytes under a collision-resistant generated name within
/// `folder` and returns the public URL. `delete` takes the URL back and is
/// idempotent: deleting a missing object is not an error. Write failures
/// propagate; callers doing cleanup are expected to log and swallow delete
/// failures rather than let them block the primary operation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store bytes and return the public URL of the new object.
    async fn store(
        &self,
        folder: &str,
        original_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Fetch the bytes behind a URL previously returned by `store`.
    async fn download(&self, url: &str) -> StorageResult<Vec<u8>>;

    /// Best-effort removal. Missing objects are not an error.
    async fn delete(&self, url: &str) -> StorageResult<()>;

    /// Whether the object behind `url` still exists.
    async fn exists(&self, url: &str) -> StorageResult<bool>;

    /// Which backend this is.
    fn backend_type(&self) -> StorageBackend;
}
