//! Source traits/interfaces for remote file access.

use async_trait::async_trait;
use log::debug;

use crate::error::SourceError;

/// Factory for source connections - implemented by each backend.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Connection type handed out by this source.
    type Connection: SourceConnection;

    /// Open a new, unauthenticated connection.
    ///
    /// Must give up after a bounded timeout.
    async fn connect(&self) -> Result<Self::Connection, SourceError>;
}

/// One control connection to the source server.
///
/// A connection is owned by a single worker for its whole life and is never
/// shared.
#[async_trait]
pub trait SourceConnection: Send {
    /// Authenticate with the configured credentials.
    async fn login(&mut self) -> Result<(), SourceError>;

    /// Change the working directory.
    async fn change_dir(&mut self, path: &str) -> Result<(), SourceError>;

    /// List entry names in the working directory.
    async fn list_names(&mut self) -> Result<Vec<String>, SourceError>;

    /// Read the whole file at `path` into memory.
    ///
    /// Bytes received before a failure are discarded.
    async fn fetch(&mut self, path: &str) -> Result<Vec<u8>, SourceError>;

    /// Close the connection.
    async fn close(&mut self) -> Result<(), SourceError>;
}

/// Close a connection, logging and discarding any error.
///
/// # Arguments
/// * `connection` - Connection to close
/// * `context` - Label used in log lines (usually the file path)
pub async fn close_quietly<C: SourceConnection + ?Sized>(connection: &mut C, context: &str) {
    debug!("{} -- closing FTP connection", context);
    match connection.close().await {
        Ok(()) => debug!("{} -- closed FTP connection", context),
        Err(e) => debug!("{} -- failed to close FTP connection: {}", context, e),
    }
}
