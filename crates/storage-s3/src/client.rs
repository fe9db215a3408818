//! AWS SDK S3 client implementation.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use log::{debug, info, warn};

use ftp_to_s3_storage::{StorageClient, StorageError, StorageSettings};

use crate::error::S3Error;

/// StorageClient implementation using AWS SDK for Rust.
///
/// The SDK client pools connections internally and is cheap to share, so a
/// single instance serves every concurrent transfer.
pub struct S3StorageClient {
    /// The underlying S3 client.
    s3_client: S3Client,
    /// Expected bucket owner for security validation.
    expected_bucket_owner: Option<String>,
}

impl S3StorageClient {
    /// Create a new S3 storage client.
    ///
    /// Unset settings fall back to the default AWS provider chain.
    ///
    /// # Arguments
    /// * `settings` - Storage settings including optional region and credentials
    ///
    /// # Returns
    /// A new S3 storage client, or `InvalidConfig` for blank overrides.
    pub async fn new(settings: StorageSettings) -> Result<Self, StorageError> {
        validate_settings(&settings).map_err(|e| e.into_storage_error("", ""))?;

        let mut config_loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(ref region) = settings.region {
            config_loader = config_loader.region(Region::new(region.clone()));
        }

        if let Some(ref creds) = settings.credentials {
            let credentials = Credentials::new(
                &creds.access_key_id,
                &creds.secret_access_key,
                creds.session_token.clone(),
                None,
                "ftp-to-s3",
            );
            config_loader = config_loader.credentials_provider(credentials);
        }

        if let Some(ref url) = settings.endpoint_url {
            config_loader = config_loader.endpoint_url(url);
        }

        let sdk_config = config_loader.load().await;
        if sdk_config.region().is_none() {
            warn!("No AWS region configured; S3 requests will likely fail");
        }

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();
        let s3_client = S3Client::from_conf(s3_config);
        info!("Established AWS S3 client");

        Ok(Self {
            s3_client,
            expected_bucket_owner: settings.expected_bucket_owner,
        })
    }
}

/// Reject overrides that are present but blank.
fn validate_settings(settings: &StorageSettings) -> Result<(), S3Error> {
    if matches!(settings.region.as_deref(), Some(r) if r.trim().is_empty()) {
        return Err(S3Error::ConfigError("region must not be empty".into()));
    }
    if matches!(settings.endpoint_url.as_deref(), Some(u) if u.trim().is_empty()) {
        return Err(S3Error::ConfigError("endpoint URL must not be empty".into()));
    }
    if let Some(ref creds) = settings.credentials {
        if creds.access_key_id.is_empty() || creds.secret_access_key.is_empty() {
            return Err(S3Error::ConfigError(
                "static credentials need both an access key id and a secret".into(),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
    ) -> Result<(), StorageError> {
        let size: usize = data.len();
        let mut request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data));

        if let Some(ref owner) = self.expected_bucket_owner {
            request = request.expected_bucket_owner(owner);
        }

        request
            .send()
            .await
            .map_err(|err| S3Error::from_sdk(err).into_storage_error(bucket, key))?;

        debug!("Put s3://{}/{} ({} bytes)", bucket, key, size);
        Ok(())
    }
}
