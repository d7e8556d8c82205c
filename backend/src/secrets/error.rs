//! Error types for credential retrieval

use aws_sdk_secretsmanager::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::get_secret_value::GetSecretValueError,
};
use thiserror::Error;

/// Errors that can occur while resolving storage credentials
#[derive(Error, Debug)]
pub enum SecretsError {
    /// No secret exists under the id
    #[error("Secret not found: {0}")]
    NotFound(String),

    /// The process identity cannot read the secret
    #[error("Access denied to secret: {0}")]
    AccessDenied(String),

    /// Secrets Manager could not decrypt the secret
    #[error("Secret decryption failed: {0}")]
    DecryptionFailed(String),

    /// The secret exists but does not hold the expected JSON
    #[error("Invalid secret format: {0}")]
    InvalidFormat(String),

    /// Any other SDK failure
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),
}

impl SecretsError {
    /// Classifies a `GetSecretValue` failure for the secret `secret_id`
    pub(super) fn from_sdk(secret_id: &str, error: &SdkError<GetSecretValueError>) -> Self {
        match error.as_service_error() {
            Some(GetSecretValueError::ResourceNotFoundException(_)) => {
                Self::NotFound(secret_id.to_string())
            }
            Some(GetSecretValueError::DecryptionFailure(_)) => {
                Self::DecryptionFailed(secret_id.to_string())
            }
            Some(service_err) if service_err.code() == Some("AccessDeniedException") => {
                Self::AccessDenied(secret_id.to_string())
            }
            _ => Self::AwsSdk(DisplayErrorContext(error).to_string()),
        }
    }
}
