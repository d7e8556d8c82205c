use std::sync::Arc;

use anyhow::Context;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_secretsmanager::Client as SecretsClient;

use qr_backend::{
    object_store::{ObjectStore, S3ObjectStore},
    secrets::SecretsCredentialProvider,
    server,
    types::Environment,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables already set in the process take precedence over `.env`
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production (Datadog), regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    // Never serve without storage credentials
    let secrets = SecretsCredentialProvider::new(SecretsClient::new(
        &environment.aws_config().await,
    ));
    let credentials = secrets
        .storage_credentials(&environment.storage_secret_id())
        .await
        .context("Failed to resolve storage credentials")?;

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(credentials.into()).await,
    ));
    let object_store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(
        s3_client,
        environment.s3_bucket(),
        environment.s3_public_domain(),
    ));

    server::start(environment, object_store).await
}
