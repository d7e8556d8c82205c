use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{response::IntoResponse, routing::get, Extension, Json};

/// Docs UI and raw OpenAPI document, mounted only when `enabled`
pub fn handler(enabled: bool) -> ApiRouter {
    if !enabled {
        return ApiRouter::new();
    }

    let scalar = Scalar::new("/openapi.json").with_title("QR Code Backend Docs");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(Extension(openapi): Extension<OpenApi>) -> impl IntoResponse {
    Json(openapi)
}
