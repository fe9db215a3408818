//! FTP backend built on the blocking `suppaftp` client.

use std::io::Read;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};

use crate::error::SourceError;
use crate::traits::{RemoteSource, SourceConnection};
use crate::types::FtpSettings;

/// RemoteSource implementation for plain FTP servers.
///
/// Each call to `connect` opens a fresh control connection.
#[derive(Debug, Clone)]
pub struct FtpSource {
    settings: Arc<FtpSettings>,
}

impl FtpSource {
    /// Create a new FTP source.
    ///
    /// # Arguments
    /// * `settings` - Server address, credentials and timeout
    pub fn new(settings: FtpSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Settings this source connects with.
    pub fn settings(&self) -> &FtpSettings {
        &self.settings
    }
}

#[async_trait]
impl RemoteSource for FtpSource {
    type Connection = FtpConnection;

    async fn connect(&self) -> Result<FtpConnection, SourceError> {
        let settings: Arc<FtpSettings> = Arc::clone(&self.settings);
        let address: String = settings.address();

        let stream: FtpStream = tokio::task::spawn_blocking(move || open_stream(&settings))
            .await
            .map_err(|e| SourceError::Connect {
                host: address.clone(),
                message: e.to_string(),
            })?
            .map_err(|message| SourceError::Connect {
                host: address.clone(),
                message,
            })?;

        debug!("Connected to FTP host {}", address);
        Ok(FtpConnection {
            stream: Some(stream),
            settings: Arc::clone(&self.settings),
        })
    }
}

/// Resolve the host and open a control connection with bounded timeouts.
///
/// The socket timeouts are in place before the server greeting is read, so a
/// host that accepts but never greets fails within `settings.timeout`.
fn open_stream(settings: &FtpSettings) -> Result<FtpStream, String> {
    let addrs: Vec<SocketAddr> = (settings.host.as_str(), settings.port)
        .to_socket_addrs()
        .map_err(|e| e.to_string())?
        .collect();

    let mut last_error: String = format!("{} did not resolve to any address", settings.host);
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, settings.timeout) {
            Ok(tcp) => {
                tcp.set_read_timeout(Some(settings.timeout))
                    .map_err(|e| e.to_string())?;
                tcp.set_write_timeout(Some(settings.timeout))
                    .map_err(|e| e.to_string())?;
                return FtpStream::connect_with_stream(tcp).map_err(|e| e.to_string());
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    Err(last_error)
}

/// A single FTP control connection.
///
/// The stream is moved onto the blocking pool for each command and put back
/// afterwards; it is `None` once the connection has been closed.
pub struct FtpConnection {
    stream: Option<FtpStream>,
    settings: Arc<FtpSettings>,
}

impl FtpConnection {
    /// Run one blocking command against the stream.
    async fn run_blocking<T, E, F>(&mut self, f: F) -> Result<T, String>
    where
        F: FnOnce(&mut FtpStream) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let mut stream: FtpStream = self
            .stream
            .take()
            .ok_or_else(|| "connection already closed".to_string())?;

        let (stream, result) = tokio::task::spawn_blocking(move || {
            let result = f(&mut stream);
            (stream, result)
        })
        .await
        .map_err(|e| format!("FTP worker task failed: {}", e))?;

        self.stream = Some(stream);
        result.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl SourceConnection for FtpConnection {
    async fn login(&mut self) -> Result<(), SourceError> {
        let user: String = self.settings.username.clone();
        let password: String = self.settings.password.clone();
        let login_user: String = user.clone();

        self.run_blocking(move |s| s.login(login_user.as_str(), password.as_str()))
            .await
            .map_err(|message| SourceError::Auth { user, message })?;

        self.run_blocking(|s| s.transfer_type(FileType::Binary))
            .await
            .map_err(|message| SourceError::Command {
                command: "TYPE",
                path: "I".to_string(),
                message,
            })?;

        debug!("Logged in to {}", self.settings.address());
        Ok(())
    }

    async fn change_dir(&mut self, path: &str) -> Result<(), SourceError> {
        let target: String = path.to_string();
        self.run_blocking(move |s| s.cwd(target.as_str()))
            .await
            .map_err(|message| SourceError::Command {
                command: "CWD",
                path: path.to_string(),
                message,
            })
    }

    async fn list_names(&mut self) -> Result<Vec<String>, SourceError> {
        self.run_blocking(|s| s.nlst(None))
            .await
            .map_err(|message| SourceError::Command {
                command: "NLST",
                path: ".".to_string(),
                message,
            })
    }

    async fn fetch(&mut self, path: &str) -> Result<Vec<u8>, SourceError> {
        let target: String = path.to_string();
        let timeout = self.settings.timeout;
        self.run_blocking(move |s| -> Result<Vec<u8>, FtpError> {
            let mut data = s.retr_as_stream(target.as_str())?;
            data.get_ref()
                .set_read_timeout(Some(timeout))
                .map_err(FtpError::ConnectionError)?;

            let mut buf: Vec<u8> = Vec::new();
            data.read_to_end(&mut buf)
                .map_err(FtpError::ConnectionError)?;
            s.finalize_retr_stream(data)?;
            Ok(buf)
        })
        .await
        .map_err(|message| SourceError::Fetch {
            path: path.to_string(),
            message,
        })
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };

        // The socket is dropped with the stream whether or not QUIT succeeds.
        tokio::task::spawn_blocking(move || stream.quit())
            .await
            .map_err(|e| SourceError::Close {
                message: e.to_string(),
            })?
            .map_err(|e| SourceError::Close {
                message: e.to_string(),
            })
    }
}
