//! QR code generation endpoint

use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use url::Url;
use validator::Validate;

use crate::{
    object_store::ObjectStore,
    qr_image::{QrImageEncoder, PNG_CONTENT_TYPE},
    storage_key::StorageKeyStrategy,
    types::{AppError, Environment, ValidatedQuery},
};

/// Per-process settings for QR code generation
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeSettings {
    /// Renderer with the fixed image configuration
    pub encoder: QrImageEncoder,
    /// Object key derivation policy
    pub key_strategy: StorageKeyStrategy,
    /// Reject inputs that are not absolute http(s) URLs
    pub strict_url_validation: bool,
}

impl QrCodeSettings {
    /// Reads the settings from the environment
    #[must_use]
    pub fn from_environment(environment: &Environment) -> Self {
        Self {
            encoder: QrImageEncoder::default(),
            key_strategy: environment.storage_key_strategy(),
            strict_url_validation: environment.strict_url_validation(),
        }
    }
}

/// Query parameters of the generate endpoint
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct GenerateQrQuery {
    /// Text to encode, usually a URL
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,
}

/// Successful generation result
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GenerateQrResponse {
    /// Public URL of the generated PNG
    pub qr_code_url: String,
}

/// Generates a QR code for a URL and publishes it
///
/// 1. Renders the URL as a PNG QR code in memory
/// 2. Derives the object key from the URL
/// 3. Uploads the PNG with a public-read ACL
///
/// # Returns
///
/// Returns `Ok(Json<GenerateQrResponse>)` with the public URL of the image.
///
/// # Errors
///
/// - `400 BAD_REQUEST` - Missing or empty `url`, or not an http(s) URL under strict validation
/// - `500 INTERNAL_SERVER_ERROR` - The URL cannot be encoded or the upload failed
#[instrument(skip_all)]
pub async fn generate_qr(
    Extension(object_store): Extension<Arc<dyn ObjectStore>>,
    Extension(settings): Extension<QrCodeSettings>,
    ValidatedQuery(query): ValidatedQuery<GenerateQrQuery>,
) -> Result<Json<GenerateQrResponse>, AppError> {
    if settings.strict_url_validation {
        ensure_http_url(&query.url)?;
    }

    let png = settings.encoder.encode_png(&query.url)?;
    let key = settings.key_strategy.derive_key(&query.url);

    object_store
        .put_public_object(&key, png, PNG_CONTENT_TYPE)
        .await?;

    let qr_code_url = object_store.public_url(&key);
    info!(key = %key, bucket = object_store.bucket(), "Published QR code");

    Ok(Json(GenerateQrResponse { qr_code_url }))
}

fn ensure_http_url(input: &str) -> Result<(), AppError> {
    match Url::parse(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "invalid_url",
            "URL must be an absolute http or https URL",
            false,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_http_url() {
        assert!(ensure_http_url("https://example.com/path").is_ok());
        assert!(ensure_http_url("http://a.com").is_ok());

        for input in ["example.com", "ftp://a.com", "mailto:someone@a.com", "https://"] {
            let err = ensure_http_url(input).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "input: {input}");
            assert_eq!(err.code(), "invalid_url");
        }
    }
}
