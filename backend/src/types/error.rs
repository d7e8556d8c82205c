//! Universal error handling for the API

use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{object_store::BucketError, qr_image::QrImageError};

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: Cow<'static, str>,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(
        status: StatusCode,
        code: &'static str,
        msg: impl Into<Cow<'static, str>>,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody {
                    code,
                    message: msg.into(),
                },
            },
        }
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert bucket errors to application errors
///
/// Every upload failure is a server error; the message carries the failure
/// description.
impl From<BucketError> for AppError {
    fn from(err: BucketError) -> Self {
        use BucketError::{
            AccessDenied, AwsError, ConfigError, NoSuchBucket, S3Error, UpstreamError,
        };

        let (code, retry) = match &err {
            UpstreamError(_) | AwsError(_) => ("upstream_error", true),
            S3Error(_) => ("upload_failed", true),
            AccessDenied(_) | NoSuchBucket(_) | ConfigError(_) => ("upload_failed", false),
        };

        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            code,
            format!("Failed to upload QR code: {err}"),
            retry,
        )
    }
}

/// Convert rendering errors to application errors
impl From<QrImageError> for AppError {
    fn from(err: QrImageError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "qr_encoding_failed",
            format!("Failed to generate QR code: {err}"),
            false,
        )
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
