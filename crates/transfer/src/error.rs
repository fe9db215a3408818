//! Error types for transfer runs.

use ftp_to_s3_source::SourceError;
use ftp_to_s3_storage::StorageError;
use thiserror::Error;

/// Fatal errors that stop a whole run.
///
/// Per-file failures are never reported through this type; they end up in
/// `TransferReport::still_failed` instead.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The source directory could not be listed.
    #[error("Failed to list {directory}: {source}")]
    Listing {
        directory: String,
        #[source]
        source: SourceError,
    },

    /// The object store client could not be created.
    #[error("Failed to set up object storage: {0}")]
    Storage(#[from] StorageError),

    /// Invalid run parameters.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl TransferError {
    /// Create a listing error for a directory.
    ///
    /// # Arguments
    /// * `directory` - Directory that was being listed
    /// * `source` - The underlying source error
    pub fn listing(directory: impl Into<String>, source: SourceError) -> Self {
        TransferError::Listing {
            directory: directory.into(),
            source,
        }
    }
}
