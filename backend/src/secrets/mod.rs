//! Storage credentials resolved from AWS Secrets Manager
mod error;

use std::fmt;

use aws_sdk_s3::config::Credentials;
use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use tracing::{debug, info};

pub use error::SecretsError;

/// Provider name reported by the SDK for these credentials
const PROVIDER_NAME: &str = "SecretsManager";

/// Access key pair used to authenticate against S3
///
/// Stored in the secret as
/// `{"aws_access_key_id": "...", "aws_secret_access_key": "..."}`.
#[derive(Clone, Deserialize)]
pub struct StorageCredentials {
    #[serde(rename = "aws_access_key_id")]
    access_key_id: String,
    #[serde(rename = "aws_secret_access_key")]
    secret_access_key: String,
}

impl fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

impl StorageCredentials {
    /// Parses the JSON document stored in the secret
    ///
    /// # Errors
    ///
    /// Returns `SecretsError::InvalidFormat` if the JSON is malformed or a key is empty
    pub fn from_secret_string(secret: &str) -> Result<Self, SecretsError> {
        let credentials: Self = serde_json::from_str(secret).map_err(|e| {
            SecretsError::InvalidFormat(format!("Failed to parse storage credentials: {e}"))
        })?;

        if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
            return Err(SecretsError::InvalidFormat(
                "Storage credentials contain an empty key".to_string(),
            ));
        }

        Ok(credentials)
    }

    /// Access key id, safe to log
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }
}

impl From<StorageCredentials> for Credentials {
    fn from(credentials: StorageCredentials) -> Self {
        Self::new(
            credentials.access_key_id,
            credentials.secret_access_key,
            None,
            None,
            PROVIDER_NAME,
        )
    }
}

/// Resolves storage credentials once at startup
pub struct SecretsCredentialProvider {
    client: SecretsClient,
}

impl SecretsCredentialProvider {
    /// Creates a provider on top of a configured Secrets Manager client
    #[must_use]
    pub const fn new(client: SecretsClient) -> Self {
        Self { client }
    }

    /// Fetches and parses the credentials stored under `secret_id`
    ///
    /// # Errors
    ///
    /// Returns `SecretsError::NotFound` if the secret does not exist
    /// Returns `SecretsError::AccessDenied` if the secret cannot be read
    /// Returns `SecretsError::InvalidFormat` if the secret is binary or not the expected JSON
    pub async fn storage_credentials(
        &self,
        secret_id: &str,
    ) -> Result<StorageCredentials, SecretsError> {
        debug!(secret_id, "Fetching storage credentials from Secrets Manager");

        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| SecretsError::from_sdk(secret_id, &e))?;

        let secret = response
            .secret_string()
            .ok_or_else(|| SecretsError::InvalidFormat("Secret is binary, not string".to_string()))?;

        let credentials = StorageCredentials::from_secret_string(secret)?;

        info!(
            secret_id,
            version_id = ?response.version_id(),
            access_key_id = credentials.access_key_id(),
            "Resolved storage credentials"
        );

        Ok(credentials)
    }
}
