//! Source-side connections for ftp-to-s3.
//!
//! A `RemoteSource` hands out independent `SourceConnection`s. Every transfer
//! opens its own connection, because an FTP control connection cannot run
//! commands for two files at once.
//!
//! The `FtpSource` backend wraps the blocking `suppaftp` client and runs each
//! command on the tokio blocking pool so that a slow server only stalls the
//! worker waiting on it.

mod error;
mod ftp;
mod traits;
mod types;

pub use error::SourceError;
pub use ftp::{FtpConnection, FtpSource};
pub use traits::{close_quietly, RemoteSource, SourceConnection};
pub use types::FtpSettings;
