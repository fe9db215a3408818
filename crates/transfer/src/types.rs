//! Shared data structures for transfer runs.

use ftp_to_s3_common::{base_name, destination_key, join_remote_path};
use serde::Serialize;

/// One file's transfer intent.
///
/// The destination key is fixed when the job is built, so later changes to
/// the caller's prefix can never affect a job that is already running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferJob {
    /// Full remote path of the source file.
    pub source_path: String,
    /// Object key the file is written to.
    pub destination_key: String,
}

impl TransferJob {
    /// Build a job for one listed entry.
    ///
    /// # Arguments
    /// * `source_directory` - Directory the entry was listed from
    /// * `entry` - Name returned by the listing (a full path is reduced to its base name)
    /// * `output_prefix` - Destination key prefix, prepended verbatim to the base name
    pub fn new(source_directory: &str, entry: &str, output_prefix: &str) -> Self {
        let source_path: String = join_remote_path(source_directory, base_name(entry));
        let destination_key: String = destination_key(output_prefix, &source_path);
        Self {
            source_path,
            destination_key,
        }
    }
}

/// Terminal result of one transfer unit execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// File was read and uploaded.
    Success,
    /// Some step failed; carries the source path.
    Failure(String),
}

impl TransferOutcome {
    /// Whether this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TransferOutcome::Failure(_))
    }
}

/// Which pass over the jobs is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave {
    /// First attempt for every listed file.
    Initial,
    /// Single retry of the initial failures.
    Retry,
}

impl std::fmt::Display for Wave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Wave::Initial => write!(f, "initial"),
            Wave::Retry => write!(f, "retry"),
        }
    }
}

/// Progress update sent after each job concludes.
#[derive(Debug, Clone, Serialize)]
pub struct TransferProgress {
    /// Wave the job ran in.
    pub wave: Wave,
    /// Source path of the job that just concluded.
    pub source_path: String,
    /// Whether it succeeded.
    pub succeeded: bool,
    /// Jobs concluded so far in this wave.
    pub completed: usize,
    /// Jobs in this wave.
    pub total: usize,
}

/// Aggregate result of one orchestrator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    /// Source paths that failed both attempts, in listing order.
    pub still_failed: Vec<String>,
    /// Number of entries in the directory listing.
    pub total_listed: usize,
    /// Number of files that reached success in either wave.
    pub total_succeeded: usize,
    /// Number of files that failed the initial wave.
    pub retried: usize,
}

impl TransferReport {
    /// Whether every listed file was transferred.
    pub fn is_complete(&self) -> bool {
        self.still_failed.is_empty()
    }
}
