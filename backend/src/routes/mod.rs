mod docs;
mod health;
pub mod qr_codes;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

use crate::types::Environment;

/// Creates the router with all handler routes
pub fn handler(environment: &Environment) -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler(environment.show_api_docs()))
        .api_route("/health", get(health::handler))
        // The trailing slash variant is what existing clients call
        .api_route("/generate-qr", post(qr_codes::generate_qr))
        .api_route("/generate-qr/", post(qr_codes::generate_qr))
}
