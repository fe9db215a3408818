//! Error types for source operations.

use thiserror::Error;

/// Errors that can occur while talking to the source server.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    /// Could not open the control connection.
    #[error("Failed to connect to {host}: {message}")]
    Connect { host: String, message: String },

    /// Server rejected the login.
    #[error("Failed to log in as {user}: {message}")]
    Auth { user: String, message: String },

    /// A directory command (cwd, nlst, type) was rejected.
    #[error("{command} {path} failed: {message}")]
    Command {
        command: &'static str,
        path: String,
        message: String,
    },

    /// Reading a file failed or was interrupted.
    #[error("Failed to read {path} from server: {message}")]
    Fetch { path: String, message: String },

    /// Closing the connection failed.
    #[error("Failed to close connection: {message}")]
    Close { message: String },
}
