//! Entry points that wire the FTP source and S3 client into an orchestrator.

use log::info;

use ftp_to_s3_common::ProgressCallback;
use ftp_to_s3_source::{FtpSettings, FtpSource};
use ftp_to_s3_storage::StorageSettings;
use ftp_to_s3_storage_s3::S3StorageClient;

use crate::error::TransferError;
use crate::orchestrator::{normalize_worker_count, TransferOptions, TransferOrchestrator};
use crate::types::{TransferProgress, TransferReport};

/// Everything needed for one FTP to S3 run.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Source server settings.
    pub ftp: FtpSettings,
    /// Object store client settings.
    pub storage: StorageSettings,
    /// Destination bucket.
    pub bucket: String,
    /// Remote directory to migrate.
    pub source_directory: String,
    /// Destination key prefix; empty means the source directory.
    pub output_prefix: String,
    /// Run options.
    pub options: TransferOptions,
}

impl TransferConfig {
    /// Create a config with default FTP login, storage and worker settings.
    ///
    /// # Arguments
    /// * `host` - FTP host name
    /// * `bucket` - Destination bucket
    /// * `source_directory` - Remote directory to migrate
    pub fn new(
        host: impl Into<String>,
        bucket: impl Into<String>,
        source_directory: impl Into<String>,
    ) -> Self {
        Self {
            ftp: FtpSettings::new(host),
            storage: StorageSettings::default(),
            bucket: bucket.into(),
            source_directory: source_directory.into(),
            output_prefix: String::new(),
            options: TransferOptions::default(),
        }
    }

    /// Set the destination key prefix.
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Set the FTP settings.
    pub fn with_ftp(mut self, ftp: FtpSettings) -> Self {
        self.ftp = ftp;
        self
    }

    /// Set the object store settings.
    pub fn with_storage(mut self, storage: StorageSettings) -> Self {
        self.storage = storage;
        self
    }

    /// Set run options.
    pub fn with_options(mut self, options: TransferOptions) -> Self {
        self.options = options;
        self
    }

    /// Reject configs that cannot describe a run.
    pub fn validate(&self) -> Result<(), TransferError> {
        if self.ftp.host.trim().is_empty() {
            return Err(TransferError::InvalidConfig {
                message: "FTP host must not be empty".into(),
            });
        }
        if self.bucket.trim().is_empty() {
            return Err(TransferError::InvalidConfig {
                message: "bucket must not be empty".into(),
            });
        }
        if self.source_directory.trim().is_empty() {
            return Err(TransferError::InvalidConfig {
                message: "source directory must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Migrate one FTP directory to S3 with anonymous login and default AWS config.
///
/// # Arguments
/// * `host` - FTP host name
/// * `bucket` - Destination bucket
/// * `source_directory` - Remote directory to migrate
/// * `output_prefix` - Destination key prefix, used verbatim; empty means `source_directory/`
/// * `num_workers` - Concurrent transfers; zero or negative runs one
pub async fn run_transfer(
    host: &str,
    bucket: &str,
    source_directory: &str,
    output_prefix: &str,
    num_workers: i64,
) -> Result<TransferReport, TransferError> {
    let config = TransferConfig::new(host, bucket, source_directory)
        .with_output_prefix(output_prefix)
        .with_options(TransferOptions::new().with_num_workers(normalize_worker_count(num_workers)));

    run_configured(&config, None).await
}

/// Migrate one FTP directory to S3 using a full config.
///
/// # Arguments
/// * `config` - Run configuration
/// * `progress` - Optional observer notified after every job
pub async fn run_configured(
    config: &TransferConfig,
    progress: Option<&dyn ProgressCallback<TransferProgress>>,
) -> Result<TransferReport, TransferError> {
    config.validate()?;

    let source = FtpSource::new(config.ftp.clone());
    let storage: S3StorageClient = S3StorageClient::new(config.storage.clone()).await?;
    info!(
        "Transferring ftp://{}{} to s3://{} with {} workers",
        config.ftp.address(),
        config.source_directory,
        config.bucket,
        config.options.effective_workers()
    );

    TransferOrchestrator::new(&source, &storage, config.bucket.as_str())
        .with_options(config.options.clone())
        .run_with_progress(&config.source_directory, &config.output_prefix, progress)
        .await
}
