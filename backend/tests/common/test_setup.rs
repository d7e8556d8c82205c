use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use qr_backend::{
    object_store::{mock::InMemoryObjectStore, BucketError, ObjectStore},
    routes::qr_codes::QrCodeSettings,
    server,
    types::Environment,
};
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "qr-test-bucket";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Load the test environment variables and initialize tracing
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to an in-memory object store
pub struct TestSetup {
    pub router: Router,
    pub object_store: Arc<InMemoryObjectStore>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_store(InMemoryObjectStore::new(TEST_BUCKET), QrCodeSettings::default())
    }

    pub fn with_settings(settings: QrCodeSettings) -> Self {
        Self::with_store(InMemoryObjectStore::new(TEST_BUCKET), settings)
    }

    pub fn failing(error: BucketError) -> Self {
        Self::with_store(
            InMemoryObjectStore::failing(TEST_BUCKET, error),
            QrCodeSettings::default(),
        )
    }

    pub fn with_store(object_store: InMemoryObjectStore, settings: QrCodeSettings) -> Self {
        Self::with_environment(object_store, settings, Environment::Development)
    }

    pub fn with_environment(
        object_store: InMemoryObjectStore,
        settings: QrCodeSettings,
        environment: Environment,
    ) -> Self {
        setup_test_env();

        let object_store = Arc::new(object_store);
        let router = server::router(
            environment,
            object_store.clone() as Arc<dyn ObjectStore>,
            settings,
            &[ALLOWED_ORIGIN.to_string()],
        )
        .expect("Failed to build router");

        Self {
            router,
            object_store,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_request(
        &self,
        request: Request<Body>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
