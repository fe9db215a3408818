//! Error types for storage operations.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Access denied.
    #[error("Access denied to s3://{bucket}/{key}: {message}")]
    AccessDenied {
        bucket: String,
        key: String,
        message: String,
    },

    /// Bucket does not exist.
    #[error("Bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    /// Network or service error.
    #[error("Upload of s3://{bucket}/{key} failed: {message}")]
    NetworkError {
        bucket: String,
        key: String,
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl StorageError {
    /// Create a network error for an object.
    ///
    /// # Arguments
    /// * `bucket` - Target bucket
    /// * `key` - Target object key
    /// * `message` - Underlying error description
    pub fn network(
        bucket: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        StorageError::NetworkError {
            bucket: bucket.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}
