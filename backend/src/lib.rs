//! QR code backend service
//!
//! Renders URLs as QR code PNGs, publishes them to S3 and returns their
//! public links.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Public object storage
pub mod object_store;

/// QR code rendering
pub mod qr_image;

/// HTTP routes
pub mod routes;

/// Storage credentials from AWS Secrets Manager
pub mod secrets;

/// Server setup
pub mod server;

/// Object key derivation
pub mod storage_key;

/// Shared types: configuration, errors, extractors
pub mod types;
