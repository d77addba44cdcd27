use crate::{ObjectStorage, PublicUrlConfig, Storage, StorageBackend, StorageError, StorageResult};
use imgdrop_core::ImageStoreConfig;
use std::sync::Arc;
use std::time::Duration;

/// Bucket label used in logs and URLs when the in-memory backend has none configured.
const MEMORY_BUCKET: &str = "imgdrop";

/// Create a storage backend based on configuration
pub fn create_storage(config: &ImageStoreConfig) -> StorageResult<Arc<dyn Storage>> {
    let timeout = Duration::from_secs(config.storage_timeout_secs);

    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let urls = PublicUrlConfig::new(bucket, config.s3_region.clone())
                .with_endpoint(config.s3_endpoint.clone())
                .with_public_base_url(config.public_base_url.clone());

            let storage = ObjectStorage::s3(urls, timeout)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;
            let urls = PublicUrlConfig::new(base_path.clone(), config.s3_region.clone())
                .with_public_base_url(Some(base_url));

            let storage = ObjectStorage::local(&base_path, urls, timeout)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        StorageBackend::Memory => {
            let bucket = config
                .s3_bucket
                .clone()
                .unwrap_or_else(|| MEMORY_BUCKET.to_string());
            let base_url = config
                .public_base_url
                .clone()
                .unwrap_or_else(|| format!("memory://{}", bucket));
            let urls = PublicUrlConfig::new(bucket, config.s3_region.clone())
                .with_public_base_url(Some(base_url));

            Ok(Arc::new(ObjectStorage::in_memory(urls, timeout)))
        }
    }
}
