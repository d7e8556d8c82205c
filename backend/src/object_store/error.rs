//! Error types for bucket operations

use aws_sdk_s3::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::put_object::PutObjectError,
};
use thiserror::Error;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BucketError {
    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// The credentials are not allowed to write to the bucket
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The configured bucket does not exist
    #[error("Bucket does not exist: {0}")]
    NoSuchBucket(String),

    /// AWS SDK error (dispatch, timeout, response parsing)
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl From<SdkError<PutObjectError>> for BucketError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        let message = DisplayErrorContext(&error).to_string();

        match &error {
            SdkError::ServiceError(service_err) => match service_err.err().code() {
                Some("AccessDenied") => Self::AccessDenied(message),
                Some("NoSuchBucket") => Self::NoSuchBucket(message),
                _ if service_err.raw().status().as_u16() >= 500 => Self::UpstreamError(message),
                _ => Self::S3Error(message),
            },
            _ => Self::AwsError(message),
        }
    }
}
