//! Shared data structures for storage operations.

/// Configuration settings for the object store client.
///
/// Every field is optional; unset values fall back to the ambient AWS
/// environment (profile, environment variables, instance metadata).
#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    /// AWS region. Uses the default provider chain when `None`.
    pub region: Option<String>,
    /// Static credentials. Uses the default provider chain when `None`.
    pub credentials: Option<AwsCredentials>,
    /// Expected bucket owner for security validation.
    pub expected_bucket_owner: Option<String>,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint_url: Option<String>,
    /// Use path-style addressing (`endpoint/bucket/key`).
    pub force_path_style: bool,
}

impl StorageSettings {
    /// Create settings that rely entirely on the ambient environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set static credentials.
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the expected bucket owner account id.
    pub fn with_expected_bucket_owner(mut self, owner: impl Into<String>) -> Self {
        self.expected_bucket_owner = Some(owner.into());
        self
    }

    /// Point the client at an S3-compatible endpoint.
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Enable or disable path-style addressing.
    pub fn with_force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }
}

/// AWS credentials.
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
