//! In-memory source and sink used by the transfer integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ftp_to_s3_source::{RemoteSource, SourceConnection, SourceError};
use ftp_to_s3_storage::{StorageClient, StorageError};

/// Step at which the listing connection should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFailure {
    Connect,
    Login,
    ChangeDir,
    List,
}

#[derive(Default)]
struct ServerState {
    listing: Vec<String>,
    listing_failure: Option<ListingFailure>,
    /// Remaining forced failures per fetched path.
    fetch_failures: HashMap<String, usize>,
    /// Remaining forced failures for connections opened after the listing one.
    connect_failures: usize,
    /// Remaining forced login failures for connections after the listing one.
    login_failures: usize,
    refuse_connects: bool,
    fail_close: bool,

    connects: usize,
    opened: usize,
    closed: usize,
    fetch_attempts: HashMap<String, usize>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Scripted stand-in for an FTP server.
#[derive(Clone, Default)]
pub struct FakeServer {
    state: Arc<Mutex<ServerState>>,
}

impl FakeServer {
    pub fn with_listing(names: &[&str]) -> Self {
        let server = Self::default();
        server.state.lock().unwrap().listing = names.iter().map(|n| n.to_string()).collect();
        server
    }

    pub fn fail_listing_at(self, step: ListingFailure) -> Self {
        self.state.lock().unwrap().listing_failure = Some(step);
        self
    }

    /// Make the next `times` fetches of `path` fail.
    pub fn fail_fetch(self, path: &str, times: usize) -> Self {
        self.state
            .lock()
            .unwrap()
            .fetch_failures
            .insert(path.to_string(), times);
        self
    }

    /// Refuse the next `times` worker connections.
    pub fn fail_worker_connects(self, times: usize) -> Self {
        self.state.lock().unwrap().connect_failures = times;
        self
    }

    /// Reject the next `times` worker logins.
    pub fn fail_worker_logins(self, times: usize) -> Self {
        self.state.lock().unwrap().login_failures = times;
        self
    }

    /// Refuse every connection, including the listing one.
    pub fn refuse_connects(self) -> Self {
        self.state.lock().unwrap().refuse_connects = true;
        self
    }

    pub fn fail_close(self) -> Self {
        self.state.lock().unwrap().fail_close = true;
        self
    }

    pub fn opened(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn closed(&self) -> usize {
        self.state.lock().unwrap().closed
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.lock().unwrap().max_in_flight
    }

    pub fn fetch_attempts(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .fetch_attempts
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    fn listing_fails_at(&self, step: ListingFailure, connection_id: usize) -> bool {
        connection_id == 1 && self.state.lock().unwrap().listing_failure == Some(step)
    }

    fn failure(command: &'static str, message: &str) -> SourceError {
        SourceError::Command {
            command,
            path: ".".into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl RemoteSource for FakeServer {
    type Connection = FakeConnection;

    async fn connect(&self) -> Result<FakeConnection, SourceError> {
        let id: usize = {
            let mut state = self.state.lock().unwrap();
            state.connects += 1;
            state.connects
        };

        let refused: bool = if self.state.lock().unwrap().refuse_connects {
            true
        } else if id == 1 {
            self.listing_fails_at(ListingFailure::Connect, id)
        } else {
            let mut state = self.state.lock().unwrap();
            if state.connect_failures > 0 {
                state.connect_failures -= 1;
                true
            } else {
                false
            }
        };
        if refused {
            return Err(SourceError::Connect {
                host: "fake:21".into(),
                message: "connection refused".into(),
            });
        }

        self.state.lock().unwrap().opened += 1;
        Ok(FakeConnection {
            id,
            server: self.clone(),
            open: true,
        })
    }
}

/// Connection handed out by `FakeServer`.
pub struct FakeConnection {
    id: usize,
    server: FakeServer,
    open: bool,
}

#[async_trait]
impl SourceConnection for FakeConnection {
    async fn login(&mut self) -> Result<(), SourceError> {
        let rejected: bool = if self.id == 1 {
            self.server.listing_fails_at(ListingFailure::Login, self.id)
        } else {
            let mut state = self.server.state.lock().unwrap();
            if state.login_failures > 0 {
                state.login_failures -= 1;
                true
            } else {
                false
            }
        };
        if rejected {
            return Err(SourceError::Auth {
                user: "anonymous".into(),
                message: "530 login incorrect".into(),
            });
        }
        Ok(())
    }

    async fn change_dir(&mut self, _path: &str) -> Result<(), SourceError> {
        if self.server.listing_fails_at(ListingFailure::ChangeDir, self.id) {
            return Err(FakeServer::failure("CWD", "550 no such directory"));
        }
        Ok(())
    }

    async fn list_names(&mut self) -> Result<Vec<String>, SourceError> {
        if self.server.listing_fails_at(ListingFailure::List, self.id) {
            return Err(FakeServer::failure("NLST", "425 can't open data connection"));
        }
        Ok(self.server.state.lock().unwrap().listing.clone())
    }

    async fn fetch(&mut self, path: &str) -> Result<Vec<u8>, SourceError> {
        {
            let mut state = self.server.state.lock().unwrap();
            *state.fetch_attempts.entry(path.to_string()).or_default() += 1;
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
        }

        // Let the other workers reach this point before finishing.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let mut state = self.server.state.lock().unwrap();
        state.in_flight -= 1;
        match state.fetch_failures.get_mut(path) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(SourceError::Fetch {
                    path: path.to_string(),
                    message: "451 transfer aborted".into(),
                })
            }
            _ => Ok(format!("contents of {}", path).into_bytes()),
        }
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;

        let mut state = self.server.state.lock().unwrap();
        state.closed += 1;
        if state.fail_close {
            return Err(SourceError::Close {
                message: "421 connection reset".into(),
            });
        }
        Ok(())
    }
}

/// Object store that keeps uploads in memory.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    buckets: Mutex<Vec<String>>,
    /// Remaining forced failures per key.
    put_failures: Mutex<HashMap<String, usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `times` uploads to `key` fail.
    pub fn fail_put(self, key: &str, times: usize) -> Self {
        self.put_failures
            .lock()
            .unwrap()
            .insert(key.to_string(), times);
        self
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn buckets(&self) -> Vec<String> {
        self.buckets.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageClient for MemoryStore {
    async fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<(), StorageError> {
        self.buckets.lock().unwrap().push(bucket.to_string());

        if let Some(remaining) = self.put_failures.lock().unwrap().get_mut(key) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StorageError::network(bucket, key, "connection reset"));
            }
        }

        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }
}
