//! Connection settings for the FTP source.

use std::time::Duration;

use ftp_to_s3_common::{
    ANONYMOUS_PASSWORD, ANONYMOUS_USER, DEFAULT_FTP_PORT, DEFAULT_FTP_TIMEOUT_SECS,
};

/// Shortest timeout accepted; a zero socket timeout would mean "no timeout".
const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings for connecting to an FTP server.
#[derive(Clone)]
pub struct FtpSettings {
    /// Server host name or address.
    pub host: String,
    /// Control port.
    pub port: u16,
    /// Login user.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Timeout for the TCP connect, the server greeting, control replies and
    /// file downloads. The NLST data connection is read without a timeout, so
    /// a server that stalls mid-listing is only bounded by the OS.
    pub timeout: Duration,
}

impl FtpSettings {
    /// Create settings for an anonymous login on the default port.
    ///
    /// # Arguments
    /// * `host` - Server host name or address
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_FTP_PORT,
            username: ANONYMOUS_USER.to_string(),
            password: ANONYMOUS_PASSWORD.to_string(),
            timeout: Duration::from_secs(DEFAULT_FTP_TIMEOUT_SECS),
        }
    }

    /// Set the control port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set login credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the socket timeout. Values under one second are raised to one second.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    /// `host:port` label used in logs and errors.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for FtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
