//! Shared constants used across ftp-to-s3 crates.

/// Default FTP control port.
pub const DEFAULT_FTP_PORT: u16 = 21;

/// Default timeout for FTP connect, read and write operations (seconds).
pub const DEFAULT_FTP_TIMEOUT_SECS: u64 = 60;

/// User name sent when no credentials are configured.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Password sent with the anonymous user.
pub const ANONYMOUS_PASSWORD: &str = "anonymous@";

/// Default number of transfer workers (fully sequential).
pub const DEFAULT_NUM_WORKERS: usize = 1;

/// Separator used by remote paths and object keys.
pub const REMOTE_PATH_SEPARATOR: char = '/';
