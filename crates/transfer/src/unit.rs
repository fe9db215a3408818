//! Single-file transfer: connect, fetch, upload, close.

use log::{debug, error, info};
use thiserror::Error;

use ftp_to_s3_source::{close_quietly, RemoteSource, SourceConnection, SourceError};
use ftp_to_s3_storage::{StorageClient, StorageError};

use crate::counter::SuccessCounter;
use crate::types::{TransferJob, TransferOutcome};

/// Why a single transfer failed after its connection was opened.
#[derive(Error, Debug)]
enum UnitError {
    #[error("failed to log in to FTP server: {0}")]
    Auth(SourceError),

    #[error("failed to read file from server: {0}")]
    Fetch(SourceError),

    #[error("failed to upload file to {key}: {source}")]
    Upload { key: String, source: StorageError },
}

/// Executes one `TransferJob` end to end.
///
/// Every failure is logged and reduced to `TransferOutcome::Failure`; nothing
/// is propagated to the caller. The unit opens its own source connection and
/// closes it on every path out of `execute`.
pub struct TransferUnit<'a, S, C>
where
    S: RemoteSource,
    C: StorageClient + ?Sized,
{
    source: &'a S,
    storage: &'a C,
    bucket: &'a str,
    counter: SuccessCounter,
}

impl<'a, S, C> TransferUnit<'a, S, C>
where
    S: RemoteSource,
    C: StorageClient + ?Sized,
{
    /// Create a transfer unit.
    ///
    /// # Arguments
    /// * `source` - Connection factory for the source server
    /// * `storage` - Shared object store client
    /// * `bucket` - Destination bucket
    /// * `counter` - Success tally for the current run
    pub fn new(source: &'a S, storage: &'a C, bucket: &'a str, counter: SuccessCounter) -> Self {
        Self {
            source,
            storage,
            bucket,
            counter,
        }
    }

    /// Transfer one file.
    ///
    /// # Arguments
    /// * `job` - The file to transfer
    ///
    /// # Returns
    /// `Success` after the object is written, otherwise `Failure(source_path)`.
    pub async fn execute(&self, job: &TransferJob) -> TransferOutcome {
        let path: &str = &job.source_path;
        debug!("{} -- processing started", path);

        let mut connection: S::Connection = match self.source.connect().await {
            Ok(connection) => connection,
            Err(e) => {
                error!("{} -- failed to establish FTP connection: {}", path, e);
                return TransferOutcome::Failure(job.source_path.clone());
            }
        };
        debug!("{} -- FTP connection established", path);

        let result: Result<(), UnitError> = self.transfer_over(&mut connection, job).await;
        if let Err(ref e) = result {
            error!("{} -- {}", path, e);
        }

        close_quietly(&mut connection, path).await;

        match result {
            Ok(()) => {
                self.counter.increment();
                TransferOutcome::Success
            }
            Err(_) => TransferOutcome::Failure(job.source_path.clone()),
        }
    }

    /// Log in, read the file and upload it over an open connection.
    async fn transfer_over(
        &self,
        connection: &mut S::Connection,
        job: &TransferJob,
    ) -> Result<(), UnitError> {
        connection.login().await.map_err(UnitError::Auth)?;
        debug!("{} -- logged in to FTP server", job.source_path);

        let data: Vec<u8> = connection
            .fetch(&job.source_path)
            .await
            .map_err(UnitError::Fetch)?;
        info!("{} -- read {} bytes from server", job.source_path, data.len());

        self.storage
            .put_object(self.bucket, &job.destination_key, data)
            .await
            .map_err(|source| UnitError::Upload {
                key: job.destination_key.clone(),
                source,
            })?;
        info!(
            "{} -- uploaded to s3://{}/{}",
            job.source_path, self.bucket, job.destination_key
        );

        Ok(())
    }
}
