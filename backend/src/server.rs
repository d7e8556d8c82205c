use std::sync::Arc;

use aide::openapi::OpenApi;
use anyhow::Context;
use axum::{http::HeaderValue, Extension, Router};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::routes::{self, qr_codes::QrCodeSettings};
use crate::{object_store::ObjectStore, types::Environment};

/// Builds the application router with its dependencies attached
///
/// # Errors
///
/// Returns an error if an allowed CORS origin is not a valid header value
pub fn router(
    environment: Environment,
    object_store: Arc<dyn ObjectStore>,
    settings: QrCodeSettings,
    cors_allowed_origins: &[String],
) -> anyhow::Result<Router> {
    let mut openapi = OpenApi::default();

    let router = routes::handler(&environment)
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(object_store))
        .layer(Extension(settings))
        .layer(cors_layer(cors_allowed_origins)?);

    Ok(router)
}

/// CORS policy allowing any method and header from the given origins
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin: {origin}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    object_store: Arc<dyn ObjectStore>,
) -> anyhow::Result<()> {
    let settings = QrCodeSettings::from_environment(&environment);
    let cors_allowed_origins = environment.cors_allowed_origins();

    tracing::info!(
        key_strategy = %settings.key_strategy,
        strict_url_validation = settings.strict_url_validation,
        ?cors_allowed_origins,
        "Configured QR code generation"
    );

    let router = router(environment, object_store, settings, &cors_allowed_origins)?
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default());

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 QR Code Backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
