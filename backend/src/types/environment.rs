//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;

use crate::storage_key::StorageKeyStrategy;

/// Region used when `AWS_REGION` is unset
const DEFAULT_AWS_REGION: &str = "ap-southeast-1";

/// Secrets Manager id holding the storage credentials
const DEFAULT_STORAGE_SECRET_ID: &str = "devops-qr-code";

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the S3 bucket name for the environment
    ///
    /// # Panics
    ///
    /// Panics if the `S3_BUCKET_NAME` environment variable is not set outside development
    #[must_use]
    pub fn s3_bucket(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME environment variable is not set")
            }
            Self::Development => {
                env::var("S3_BUCKET_NAME").unwrap_or_else(|_| "qr-codes".to_string())
            }
        }
    }

    /// AWS region hosting the bucket and the credentials secret
    #[must_use]
    pub fn aws_region(&self) -> String {
        env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_AWS_REGION.to_string())
    }

    /// Secrets Manager id of the storage credentials
    #[must_use]
    pub fn storage_secret_id(&self) -> String {
        env::var("STORAGE_SECRET_ID").unwrap_or_else(|_| DEFAULT_STORAGE_SECRET_ID.to_string())
    }

    /// Domain under which objects are publicly reachable as `<bucket>.<domain>`
    #[must_use]
    pub fn s3_public_domain(&self) -> String {
        env::var("S3_PUBLIC_DOMAIN").unwrap_or_else(|_| match self {
            Self::Production | Self::Staging => "s3.amazonaws.com".to_string(),
            Self::Development => "s3.localhost.localstack.cloud:4566".to_string(),
        })
    }

    /// Origins allowed to call the API from a browser
    ///
    /// Read from the comma separated `CORS_ALLOWED_ORIGINS` variable.
    #[must_use]
    pub fn cors_allowed_origins(&self) -> Vec<String> {
        match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect(),
            Err(_) => match self {
                Self::Production | Self::Staging => Vec::new(),
                Self::Development => vec!["http://localhost:3000".to_string()],
            },
        }
    }

    /// How object keys are derived from the encoded text
    ///
    /// # Panics
    ///
    /// Panics if `STORAGE_KEY_STRATEGY` is set to an unknown strategy
    #[must_use]
    pub fn storage_key_strategy(&self) -> StorageKeyStrategy {
        env::var("STORAGE_KEY_STRATEGY").map_or_else(
            |_| StorageKeyStrategy::default(),
            |val| {
                val.trim()
                    .parse()
                    .unwrap_or_else(|_| panic!("Invalid storage key strategy: {val}"))
            },
        )
    }

    /// Whether inputs must parse as absolute http(s) URLs
    #[must_use]
    pub fn strict_url_validation(&self) -> bool {
        env::var("STRICT_URL_VALIDATION")
            .ok()
            .and_then(|val| val.trim().parse::<bool>().ok())
            .unwrap_or(false)
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .region(Region::new(self.aws_region()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration authenticated with the given credentials
    pub async fn s3_client_config(&self, credentials: Credentials) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder().credentials_provider(credentials);

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Test development (default)
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test explicit development
        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test staging
        env::set_var("APP_ENV", " Staging ");
        assert_eq!(Environment::from_env(), Environment::Staging);

        // Test production
        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn test_storage_defaults() {
        env::remove_var("AWS_REGION");
        env::remove_var("STORAGE_SECRET_ID");
        env::remove_var("S3_PUBLIC_DOMAIN");
        env::remove_var("S3_BUCKET_NAME");

        let env = Environment::Production;
        assert_eq!(env.aws_region(), "ap-southeast-1");
        assert_eq!(env.storage_secret_id(), "devops-qr-code");
        assert_eq!(env.s3_public_domain(), "s3.amazonaws.com");

        let env = Environment::Development;
        assert_eq!(env.s3_bucket(), "qr-codes");
        assert_eq!(env.s3_public_domain(), "s3.localhost.localstack.cloud:4566");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "S3_BUCKET_NAME environment variable is not set")]
    fn test_production_requires_bucket() {
        env::remove_var("S3_BUCKET_NAME");
        let _ = Environment::Production.s3_bucket();
    }

    #[test]
    #[serial]
    fn test_cors_allowed_origins() {
        env::remove_var("CORS_ALLOWED_ORIGINS");
        assert_eq!(
            Environment::Development.cors_allowed_origins(),
            vec!["http://localhost:3000".to_string()]
        );
        assert!(Environment::Production.cors_allowed_origins().is_empty());

        env::set_var(
            "CORS_ALLOWED_ORIGINS",
            "https://qr.example.com, https://admin.example.com,,",
        );
        assert_eq!(
            Environment::Production.cors_allowed_origins(),
            vec![
                "https://qr.example.com".to_string(),
                "https://admin.example.com".to_string()
            ]
        );

        env::remove_var("CORS_ALLOWED_ORIGINS");
    }

    #[test]
    #[serial]
    fn test_storage_key_strategy_from_env() {
        env::remove_var("STORAGE_KEY_STRATEGY");
        assert_eq!(
            Environment::Production.storage_key_strategy(),
            StorageKeyStrategy::SchemeStripped
        );

        env::set_var("STORAGE_KEY_STRATEGY", "content-hash");
        assert_eq!(
            Environment::Production.storage_key_strategy(),
            StorageKeyStrategy::ContentHash
        );

        env::remove_var("STORAGE_KEY_STRATEGY");
    }

    #[test]
    #[serial]
    fn test_strict_url_validation_flag() {
        env::remove_var("STRICT_URL_VALIDATION");
        assert!(!Environment::Production.strict_url_validation());

        env::set_var("STRICT_URL_VALIDATION", "true");
        assert!(Environment::Production.strict_url_validation());

        // Unparseable values fall back to disabled
        env::set_var("STRICT_URL_VALIDATION", "yes please");
        assert!(!Environment::Production.strict_url_validation());

        env::remove_var("STRICT_URL_VALIDATION");
    }
}
