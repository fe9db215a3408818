//! Storage traits/interfaces for object uploads.

use async_trait::async_trait;

use crate::error::StorageError;

/// Low-level object store operations - implemented by each backend.
///
/// A single client is shared by every transfer worker, so implementations
/// must be safe for concurrent use.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Upload bytes to `bucket` under `key`, replacing any existing object.
    async fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>)
        -> Result<(), StorageError>;
}
