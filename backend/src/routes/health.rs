use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::object_store::ObjectStore;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: &'static str,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
    /// Bucket generated images are published to
    bucket: String,
}

/// Health check endpoint
///
/// Reports version information and the bucket in use. Does not call the
/// object store.
pub async fn handler(
    Extension(object_store): Extension<Arc<dyn ObjectStore>>,
) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
        bucket: object_store.bucket().to_string(),
    })
}
