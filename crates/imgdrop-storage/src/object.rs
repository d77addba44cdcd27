use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::url::PublicUrlConfig;
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, ObjectStore, PutOptions, PutPayload, Result as ObjectResult,
};
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "storage-s3")]
use object_store::aws::AmazonS3Builder;
#[cfg(feature = "storage-s3")]
use object_store::ClientOptions;
#[cfg(feature = "storage-local")]
use object_store::local::LocalFileSystem;

/// Object store client backed by any `object_store` implementation
#[derive(Clone)]
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    backend: StorageBackend,
    urls: PublicUrlConfig,
    timeout: Duration,
    // LocalFileSystem rejects object attributes, so content type is only sent
    // to stores that persist it.
    store_content_type: bool,
}

impl ObjectStorage {
    /// Wrap an existing store.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        backend: StorageBackend,
        urls: PublicUrlConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            backend,
            urls,
            timeout,
            store_content_type: backend != StorageBackend::Local,
        }
    }

    /// Create an S3 (or S3-compatible) backed client
    ///
    /// Credentials are read from the standard `AWS_*` environment variables.
    ///
    /// # Arguments
    /// * `urls` - bucket, region, optional custom endpoint and public base URL
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `timeout` - upper bound for each request
    #[cfg(feature = "storage-s3")]
    pub fn s3(urls: PublicUrlConfig, timeout: Duration) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(urls.region.clone())
            .with_bucket_name(urls.bucket.clone())
            .with_client_options(ClientOptions::new().with_timeout(timeout));

        if let Some(ref endpoint) = urls.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), StorageBackend::S3, urls, timeout))
    }

    /// Create a client writing below a local directory
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (created if missing)
    /// * `urls` - should carry the base URL the directory is served under
    #[cfg(feature = "storage-local")]
    pub fn local(
        base_path: impl AsRef<std::path::Path>,
        urls: PublicUrlConfig,
        timeout: Duration,
    ) -> StorageResult<Self> {
        let base_path = base_path.as_ref();
        std::fs::create_dir_all(base_path).map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let store = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(
            Arc::new(store),
            StorageBackend::Local,
            urls,
            timeout,
        ))
    }

    /// Create a client over a fresh in-memory store
    pub fn in_memory(urls: PublicUrlConfig, timeout: Duration) -> Self {
        Self::new(
            Arc::new(InMemory::new()),
            StorageBackend::Memory,
            urls,
            timeout,
        )
    }

    /// The wrapped store, for reading objects back.
    pub fn inner(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl Storage for ObjectStorage {
    async fn put(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        let size = data.len();
        let location = Path::from(storage_key);
        let payload = PutPayload::from(Bytes::from(data));

        let mut attributes = Attributes::new();
        if self.store_content_type {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = match tokio::time::timeout(
            self.timeout,
            self.store.put_opts(&location, payload, options),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    backend = %self.backend,
                    bucket = %self.urls.bucket,
                    key = %storage_key,
                    size_bytes = size,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Object store put timed out"
                );
                return Err(StorageError::Unavailable(format!(
                    "put timed out after {:?}",
                    self.timeout
                )));
            }
        };

        let put = result.map_err(|e| {
            tracing::error!(
                error = %e,
                backend = %self.backend,
                bucket = %self.urls.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object store put failed"
            );
            StorageError::Unavailable(e.to_string())
        })?;

        tracing::info!(
            backend = %self.backend,
            bucket = %self.urls.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object store put successful"
        );

        Ok(StoredObject {
            key: storage_key.to_string(),
            size_bytes: size,
            content_type: content_type.to_string(),
            e_tag: put.e_tag,
        })
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.urls.public_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::throttle::{ThrottleConfig, ThrottledStore};
    use object_store::ObjectStoreExt;

    fn urls() -> PublicUrlConfig {
        PublicUrlConfig::new("avatars", "us-east-1")
    }

    #[tokio::test]
    async fn test_put_stores_bytes_and_content_type() {
        let storage = ObjectStorage::in_memory(urls(), Duration::from_secs(5));

        let stored = storage
            .put("users/1/profile/a.png", b"png bytes".to_vec(), "image/png")
            .await
            .unwrap();

        assert_eq!(stored.key, "users/1/profile/a.png");
        assert_eq!(stored.size_bytes, 9);
        assert_eq!(stored.content_type, "image/png");

        let result = storage
            .inner()
            .get(&Path::from("users/1/profile/a.png"))
            .await
            .unwrap();
        let content_type: Option<&str> = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.as_ref());
        assert_eq!(content_type, Some("image/png"));
        let bytes = result.bytes().await.unwrap();
        assert_eq!(bytes.as_ref(), b"png bytes");
    }

    #[tokio::test]
    async fn test_public_url_uses_config() {
        let storage = ObjectStorage::in_memory(urls(), Duration::from_secs(5));
        assert_eq!(
            storage.public_url("users/1/profile/a.png"),
            "https://avatars.s3.amazonaws.com/users/1/profile/a.png"
        );
        assert_eq!(storage.backend_type(), StorageBackend::Memory);
    }

    #[tokio::test]
    async fn test_put_timeout_is_unavailable() {
        let throttled = ThrottledStore::new(
            InMemory::new(),
            ThrottleConfig {
                wait_put_per_call: Duration::from_secs(5),
                ..Default::default()
            },
        );
        let storage = ObjectStorage::new(
            Arc::new(throttled),
            StorageBackend::Memory,
            urls(),
            Duration::from_millis(50),
        );

        let result = storage.put("k.png", b"x".to_vec(), "image/png").await;
        match result {
            Err(StorageError::Unavailable(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[cfg(feature = "storage-local")]
    #[tokio::test]
    async fn test_local_put_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ObjectStorage::local(
            dir.path(),
            urls().with_public_base_url(Some("http://localhost:3000/media".to_string())),
            Duration::from_secs(5),
        )
        .unwrap();

        let stored = storage
            .put("users/9/profile/b.jpg", b"jpeg".to_vec(), "image/jpeg")
            .await
            .unwrap();
        assert_eq!(stored.size_bytes, 4);

        let on_disk = std::fs::read(dir.path().join("users/9/profile/b.jpg")).unwrap();
        assert_eq!(on_disk, b"jpeg");
        assert_eq!(
            storage.public_url("users/9/profile/b.jpg"),
            "http://localhost:3000/media/users/9/profile/b.jpg"
        );
    }

    #[cfg(feature = "storage-local")]
    #[tokio::test]
    async fn test_local_io_failure_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is needed makes the write fail.
        std::fs::write(dir.path().join("users"), b"not a directory").unwrap();

        let storage =
            ObjectStorage::local(dir.path(), urls(), Duration::from_secs(5)).unwrap();
        let result = storage
            .put("users/1/profile/c.png", b"data".to_vec(), "image/png")
            .await;

        assert!(matches!(result, Err(StorageError::Unavailable(_))));
    }
}
