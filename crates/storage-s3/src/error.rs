//! Error types for S3 storage operations.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use ftp_to_s3_storage::StorageError;
use thiserror::Error;

/// Errors specific to the S3 storage client.
#[derive(Error, Debug)]
pub enum S3Error {
    /// AWS SDK error.
    #[error("AWS SDK error: {message}")]
    SdkError {
        /// Service error code (e.g. `AccessDenied`), when the service sent one.
        code: Option<String>,
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl S3Error {
    /// Capture code and full error chain from an SDK error.
    pub(crate) fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        S3Error::SdkError {
            code: err.code().map(str::to_string),
            message: DisplayErrorContext(&err).to_string(),
        }
    }

    /// Convert into a backend-agnostic storage error for an object.
    ///
    /// # Arguments
    /// * `bucket` - Bucket the request targeted
    /// * `key` - Object key the request targeted
    pub fn into_storage_error(self, bucket: &str, key: &str) -> StorageError {
        match self {
            S3Error::SdkError { code, message } => match code.as_deref() {
                Some("AccessDenied") => StorageError::AccessDenied {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message,
                },
                Some("NoSuchBucket") => StorageError::BucketNotFound {
                    bucket: bucket.to_string(),
                },
                _ => StorageError::network(bucket, key, message),
            },
            S3Error::ConfigError(message) => StorageError::InvalidConfig { message },
        }
    }
}
