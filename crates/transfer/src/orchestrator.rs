//! Two-wave transfer orchestration.
//!
//! A run lists the source directory once and transfers every entry through a
//! bounded worker pool. Files that fail get exactly one more attempt, in a
//! second pool that starts only after the first has drained completely.
//!
//! # Example
//!
//! ```ignore
//! use ftp_to_s3_transfer::{TransferOptions, TransferOrchestrator};
//!
//! let orchestrator = TransferOrchestrator::new(&source, &storage, "my-bucket")
//!     .with_options(TransferOptions::new().with_num_workers(8));
//! let report = orchestrator.run("/pub/data", "").await?;
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use log::{debug, error, info};

use ftp_to_s3_common::{directory_prefix, ProgressCallback, DEFAULT_NUM_WORKERS};
use ftp_to_s3_source::{close_quietly, RemoteSource, SourceConnection, SourceError};
use ftp_to_s3_storage::StorageClient;

use crate::counter::SuccessCounter;
use crate::error::TransferError;
use crate::types::{TransferJob, TransferOutcome, TransferProgress, TransferReport, Wave};
use crate::unit::TransferUnit;

/// Options for transfer runs.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Number of concurrent transfers per wave. Zero is treated as one.
    pub num_workers: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_NUM_WORKERS,
        }
    }
}

impl TransferOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of concurrent transfers.
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Worker count actually used; never below one.
    pub fn effective_workers(&self) -> usize {
        self.num_workers.max(1)
    }
}

/// Clamp a user-supplied worker count to at least one.
///
/// # Arguments
/// * `requested` - Requested worker count; may be zero or negative
pub fn normalize_worker_count(requested: i64) -> usize {
    if requested < 1 {
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

/// Lists a source directory and moves its files to object storage.
pub struct TransferOrchestrator<'a, S, C>
where
    S: RemoteSource,
    C: StorageClient + ?Sized,
{
    /// Connection factory for the source server.
    source: &'a S,
    /// Shared object store client.
    storage: &'a C,
    /// Destination bucket.
    bucket: String,
    /// Run options.
    options: TransferOptions,
}

impl<'a, S, C> TransferOrchestrator<'a, S, C>
where
    S: RemoteSource,
    C: StorageClient + ?Sized,
{
    /// Create a new transfer orchestrator.
    ///
    /// # Arguments
    /// * `source` - Connection factory for the source server
    /// * `storage` - Object store client shared by all workers
    /// * `bucket` - Destination bucket
    pub fn new(source: &'a S, storage: &'a C, bucket: impl Into<String>) -> Self {
        Self {
            source,
            storage,
            bucket: bucket.into(),
            options: TransferOptions::default(),
        }
    }

    /// Set run options.
    ///
    /// # Arguments
    /// * `options` - Transfer options
    pub fn with_options(mut self, options: TransferOptions) -> Self {
        self.options = options;
        self
    }

    /// Transfer every file in `source_directory`.
    ///
    /// # Arguments
    /// * `source_directory` - Remote directory to migrate
    /// * `output_prefix` - Destination key prefix, used verbatim; empty means `source_directory/`
    ///
    /// # Returns
    /// The run report, or `TransferError::Listing` if the directory could not
    /// be listed.
    pub async fn run(
        &self,
        source_directory: &str,
        output_prefix: &str,
    ) -> Result<TransferReport, TransferError> {
        self.run_with_progress(source_directory, output_prefix, None)
            .await
    }

    /// Transfer every file in `source_directory`, reporting each concluded job.
    ///
    /// # Arguments
    /// * `source_directory` - Remote directory to migrate
    /// * `output_prefix` - Destination key prefix, used verbatim; empty means `source_directory/`
    /// * `progress` - Optional observer notified after every job in either wave
    pub async fn run_with_progress(
        &self,
        source_directory: &str,
        output_prefix: &str,
        progress: Option<&dyn ProgressCallback<TransferProgress>>,
    ) -> Result<TransferReport, TransferError> {
        let (mut listing_connection, names) = self.list_directory(source_directory).await?;
        info!("{} -- listed {} entries", source_directory, names.len());

        let prefix: String = if output_prefix.is_empty() {
            directory_prefix(source_directory)
        } else {
            output_prefix.to_string()
        };
        let jobs: Vec<TransferJob> = names
            .iter()
            .map(|name| TransferJob::new(source_directory, name, &prefix))
            .collect();
        let total_listed: usize = jobs.len();
        let counter = SuccessCounter::new();

        let failed: Vec<TransferJob> = self
            .run_wave(Wave::Initial, jobs, &counter, progress)
            .await;
        let retried: usize = failed.len();

        let still_failed: Vec<TransferJob> = if failed.is_empty() {
            info!("{} -- no failed transfers", source_directory);
            Vec::new()
        } else {
            info!(
                "{} -- retrying {} failed transfers",
                source_directory, retried
            );
            self.run_wave(Wave::Retry, failed, &counter, progress).await
        };

        close_quietly(&mut listing_connection, source_directory).await;

        let report = TransferReport {
            still_failed: still_failed.into_iter().map(|job| job.source_path).collect(),
            total_listed,
            total_succeeded: counter.get(),
            retried,
        };
        info!(
            "{} -- transferred {} of {} files ({} still failed)",
            source_directory,
            report.total_succeeded,
            report.total_listed,
            report.still_failed.len()
        );

        Ok(report)
    }

    /// Open the listing connection and read the directory's entry names.
    ///
    /// The connection stays open for the caller to close at the end of the run.
    async fn list_directory(
        &self,
        directory: &str,
    ) -> Result<(S::Connection, Vec<String>), TransferError> {
        let mut connection: S::Connection = self.source.connect().await.map_err(|e| {
            error!("{} -- failed to connect to FTP host: {}", directory, e);
            TransferError::listing(directory, e)
        })?;

        match list_over(&mut connection, directory).await {
            Ok(names) => Ok((connection, names)),
            Err(e) => {
                error!("{} -- failed to list directory: {}", directory, e);
                close_quietly(&mut connection, directory).await;
                Err(TransferError::listing(directory, e))
            }
        }
    }

    /// Run one wave over `jobs` and return the jobs that failed, in input order.
    async fn run_wave(
        &self,
        wave: Wave,
        jobs: Vec<TransferJob>,
        counter: &SuccessCounter,
        progress: Option<&dyn ProgressCallback<TransferProgress>>,
    ) -> Vec<TransferJob> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let total: usize = jobs.len();
        let workers: usize = self.options.effective_workers();
        let completed = AtomicUsize::new(0);
        let unit: TransferUnit<'_, S, C> =
            TransferUnit::new(self.source, self.storage, &self.bucket, counter.clone());
        debug!("Starting {} wave: {} jobs on {} workers", wave, total, workers);

        let mut results: Vec<(usize, TransferJob, TransferOutcome)> =
            stream::iter(jobs.into_iter().enumerate())
                .map(|(index, job)| {
                    let unit = &unit;
                    let completed = &completed;
                    async move {
                        let outcome: TransferOutcome = unit.execute(&job).await;
                        let done: usize = completed.fetch_add(1, Ordering::Relaxed) + 1;

                        if let Some(cb) = progress {
                            cb.on_progress(&TransferProgress {
                                wave,
                                source_path: job.source_path.clone(),
                                succeeded: !outcome.is_failure(),
                                completed: done,
                                total,
                            });
                        }

                        (index, job, outcome)
                    }
                })
                .buffer_unordered(workers)
                .collect()
                .await;

        results.sort_by_key(|(index, _, _)| *index);
        let failed: Vec<TransferJob> = results
            .into_iter()
            .filter(|(_, _, outcome)| outcome.is_failure())
            .map(|(_, job, _)| job)
            .collect();

        debug!("Finished {} wave: {} of {} failed", wave, failed.len(), total);
        failed
    }
}

/// Log in, change into `directory` and list it.
async fn list_over<T: SourceConnection>(
    connection: &mut T,
    directory: &str,
) -> Result<Vec<String>, SourceError> {
    connection.login().await?;
    connection.change_dir(directory).await?;
    connection.list_names().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_options_default() {
        let options = TransferOptions::default();
        assert_eq!(options.num_workers, DEFAULT_NUM_WORKERS);
        assert_eq!(options.effective_workers(), 1);
    }

    #[test]
    fn test_transfer_options_with_workers() {
        let options = TransferOptions::new().with_num_workers(8);
        assert_eq!(options.effective_workers(), 8);
    }

    #[test]
    fn test_zero_workers_runs_one() {
        let options = TransferOptions::new().with_num_workers(0);
        assert_eq!(options.effective_workers(), 1);
    }

    #[test]
    fn test_normalize_worker_count() {
        assert_eq!(normalize_worker_count(-5), 1);
        assert_eq!(normalize_worker_count(0), 1);
        assert_eq!(normalize_worker_count(1), 1);
        assert_eq!(normalize_worker_count(16), 16);
    }
}
