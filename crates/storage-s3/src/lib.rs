//! AWS SDK S3 backend for ftp-to-s3 storage.
//!
//! This crate provides a `StorageClient` implementation using the AWS SDK for
//! Rust. The client is built once per run and shared by every transfer worker.
//!
//! # Example
//!
//! ```ignore
//! use ftp_to_s3_storage::StorageSettings;
//! use ftp_to_s3_storage_s3::S3StorageClient;
//!
//! let client = S3StorageClient::new(StorageSettings::default()).await?;
//! client.put_object("my-bucket", "pub/data/a.txt", bytes).await?;
//! ```

mod client;
mod error;

pub use client::S3StorageClient;
pub use error::S3Error;
