//! Public object storage for generated images
mod error;

use std::sync::Arc;

use aws_sdk_s3::{primitives::ByteStream, types::ObjectCannedAcl, Client as S3Client};
use tracing::{debug, error};

pub use error::{BucketError, BucketResult};

/// Storage that publishes objects under publicly resolvable URLs
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket objects are written to
    fn bucket(&self) -> &str;

    /// Stores `body` under `key` with a public-read access policy
    async fn put_public_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> BucketResult<()>;

    /// Public URL an object stored under `key` is served from
    fn public_url(&self, key: &str) -> String;
}

/// Builds `https://<bucket>.<store_domain>/<key>`
#[must_use]
pub fn public_object_url(bucket: &str, store_domain: &str, key: &str) -> String {
    format!("https://{bucket}.{store_domain}/{key}")
}

/// S3-backed object store
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    public_domain: String,
}

impl S3ObjectStore {
    /// Creates a new S3 object store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured, authenticated S3 client
    /// * `bucket_name` - Bucket the images are written to
    /// * `public_domain` - Domain objects are served from, e.g. `s3.amazonaws.com`
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String, public_domain: String) -> Self {
        Self {
            s3_client,
            bucket_name,
            public_domain,
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket_name
    }

    /// # Errors
    ///
    /// Returns `BucketError::AccessDenied` if the credentials cannot write to the bucket
    /// Returns `BucketError::NoSuchBucket` if the bucket does not exist
    /// Returns `BucketError::UpstreamError` for 5xx errors
    /// Returns `BucketError::AwsError` for network and timeout failures
    async fn put_public_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> BucketResult<()> {
        debug!(key, content_length = body.len(), "Uploading object");

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| {
                let err = BucketError::from(e);
                error!(key, "Failed to upload object: {err}");
                err
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.bucket_name, &self.public_domain, key)
    }
}

/// In-memory store used by tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::Mutex;

    use super::{public_object_url, BucketError, BucketResult, ObjectStore};

    /// Object captured by [`InMemoryObjectStore`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StoredObject {
        /// Object key
        pub key: String,
        /// Object bytes
        pub body: Vec<u8>,
        /// Declared content type
        pub content_type: String,
    }

    /// Object store keeping uploads in memory
    pub struct InMemoryObjectStore {
        bucket_name: String,
        public_domain: String,
        fail_with: Option<BucketError>,
        objects: Mutex<Vec<StoredObject>>,
    }

    impl InMemoryObjectStore {
        /// Store that accepts every upload
        #[must_use]
        pub fn new(bucket_name: &str) -> Self {
            Self {
                bucket_name: bucket_name.to_string(),
                public_domain: "s3.amazonaws.com".to_string(),
                fail_with: None,
                objects: Mutex::new(Vec::new()),
            }
        }

        /// Store that rejects every upload with `error`
        #[must_use]
        pub fn failing(bucket_name: &str, error: BucketError) -> Self {
            Self {
                fail_with: Some(error),
                ..Self::new(bucket_name)
            }
        }

        /// Objects uploaded so far, in upload order
        ///
        /// # Panics
        ///
        /// Panics if the lock is poisoned
        #[must_use]
        pub fn objects(&self) -> Vec<StoredObject> {
            self.objects.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ObjectStore for InMemoryObjectStore {
        fn bucket(&self) -> &str {
            &self.bucket_name
        }

        async fn put_public_object(
            &self,
            key: &str,
            body: Vec<u8>,
            content_type: &str,
        ) -> BucketResult<()> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }

            self.objects.lock().unwrap().push(StoredObject {
                key: key.to_string(),
                body,
                content_type: content_type.to_string(),
            });

            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            public_object_url(&self.bucket_name, &self.public_domain, key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::InMemoryObjectStore;
    use super::*;

    #[test]
    fn test_public_object_url() {
        assert_eq!(
            public_object_url("b", "s3.amazonaws.com", "qr_codes/x.png"),
            "https://b.s3.amazonaws.com/qr_codes/x.png"
        );
    }

    #[test]
    fn test_public_url_keeps_nested_keys() {
        assert_eq!(
            public_object_url(
                "ken-devops-qr-code",
                "s3.amazonaws.com",
                "qr_codes/example.com/path.png"
            ),
            "https://ken-devops-qr-code.s3.amazonaws.com/qr_codes/example.com/path.png"
        );
    }

    #[tokio::test]
    async fn test_in_memory_store_records_uploads() {
        let store = InMemoryObjectStore::new("b");

        store
            .put_public_object("qr_codes/x.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        let objects = store.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, "qr_codes/x.png");
        assert_eq!(objects[0].body, vec![1, 2, 3]);
        assert_eq!(objects[0].content_type, "image/png");
        assert_eq!(store.bucket(), "b");
    }

    #[tokio::test]
    async fn test_failing_store_rejects_uploads() {
        let store = InMemoryObjectStore::failing(
            "b",
            BucketError::AccessDenied("not allowed".to_string()),
        );

        let result = store
            .put_public_object("qr_codes/x.png", vec![1], "image/png")
            .await;

        assert_eq!(
            result,
            Err(BucketError::AccessDenied("not allowed".to_string()))
        );
        assert!(store.objects().is_empty());
    }
}
