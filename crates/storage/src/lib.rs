//! Object storage abstraction for ftp-to-s3 uploads.
//!
//! This crate provides a backend-agnostic interface for writing in-memory
//! buffers to an S3-style bucket. The AWS SDK backend lives in
//! `ftp_to_s3_storage_s3`; tests use in-memory implementations of the same
//! trait.

mod error;
mod traits;
mod types;

pub use error::StorageError;
pub use traits::StorageClient;
pub use types::{AwsCredentials, StorageSettings};
