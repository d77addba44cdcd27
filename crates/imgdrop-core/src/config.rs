//! Configuration module
//!
//! Upload pipeline configuration: which object store to write to, how public URLs
//! are formed, the size budget and re-encoding bounds, and the storage key layout.
//! Values come from the environment (and `.env` via dotenvy).

use std::env;

use crate::constants::{
    DEFAULT_KEY_NAMESPACE, DEFAULT_KEY_PURPOSE, DEFAULT_S3_REGION, DIMENSION_FLOOR,
    INITIAL_MAX_EDGE, MAX_IMAGE_BYTES, STORAGE_TIMEOUT_SECS,
};
use crate::storage_types::StorageBackend;

#[derive(Clone, Debug)]
pub struct ImageStoreConfig {
    pub environment: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub public_base_url: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub storage_timeout_secs: u64,
    // Image processing configuration
    pub max_image_bytes: usize,
    pub dimension_floor: u32,
    pub initial_max_edge: u32,
    // Storage key layout
    pub key_namespace: String,
    pub key_purpose: String,
}

impl Default for ImageStoreConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            storage_backend: StorageBackend::S3,
            s3_bucket: None,
            s3_region: DEFAULT_S3_REGION.to_string(),
            s3_endpoint: None,
            public_base_url: None,
            local_storage_path: None,
            local_storage_base_url: None,
            storage_timeout_secs: STORAGE_TIMEOUT_SECS,
            max_image_bytes: MAX_IMAGE_BYTES,
            dimension_floor: DIMENSION_FLOOR,
            initial_max_edge: INITIAL_MAX_EDGE,
            key_namespace: DEFAULT_KEY_NAMESPACE.to_string(),
            key_purpose: DEFAULT_KEY_PURPOSE.to_string(),
        }
    }
}

impl ImageStoreConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from a variable lookup.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(s) => s.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let s3_region = var("S3_REGION")
            .or_else(|| var("AWS_REGION"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_S3_REGION.to_string());

        let config = ImageStoreConfig {
            environment,
            storage_backend,
            s3_bucket: var("S3_BUCKET").filter(|s| !s.is_empty()),
            s3_region,
            s3_endpoint: var("S3_ENDPOINT").filter(|s| !s.is_empty()),
            public_base_url: var("S3_PUBLIC_BASE_URL").filter(|s| !s.is_empty()),
            local_storage_path: var("LOCAL_STORAGE_PATH").filter(|s| !s.is_empty()),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL").filter(|s| !s.is_empty()),
            storage_timeout_secs: var("STORAGE_TIMEOUT_SECS")
                .unwrap_or_else(|| STORAGE_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("STORAGE_TIMEOUT_SECS must be a valid number"))?,
            max_image_bytes: var("MAX_IMAGE_BYTES")
                .unwrap_or_else(|| MAX_IMAGE_BYTES.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_IMAGE_BYTES must be a valid number"))?,
            dimension_floor: var("IMAGE_DIMENSION_FLOOR")
                .unwrap_or_else(|| DIMENSION_FLOOR.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("IMAGE_DIMENSION_FLOOR must be a valid number"))?,
            initial_max_edge: var("IMAGE_INITIAL_MAX_EDGE")
                .unwrap_or_else(|| INITIAL_MAX_EDGE.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("IMAGE_INITIAL_MAX_EDGE must be a valid number"))?,
            key_namespace: var("STORAGE_KEY_NAMESPACE")
                .unwrap_or_else(|| DEFAULT_KEY_NAMESPACE.to_string())
                .trim()
                .to_string(),
            key_purpose: var("STORAGE_KEY_PURPOSE")
                .unwrap_or_else(|| DEFAULT_KEY_PURPOSE.to_string())
                .trim()
                .to_string(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_image_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_BYTES must be greater than zero"));
        }

        if self.dimension_floor == 0 {
            return Err(anyhow::anyhow!(
                "IMAGE_DIMENSION_FLOOR must be greater than zero"
            ));
        }

        if self.dimension_floor > self.initial_max_edge {
            return Err(anyhow::anyhow!(
                "IMAGE_DIMENSION_FLOOR ({}) must not exceed IMAGE_INITIAL_MAX_EDGE ({})",
                self.dimension_floor,
                self.initial_max_edge
            ));
        }

        if self.storage_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "STORAGE_TIMEOUT_SECS must be greater than zero"
            ));
        }

        for (name, segment) in [
            ("STORAGE_KEY_NAMESPACE", &self.key_namespace),
            ("STORAGE_KEY_PURPOSE", &self.key_purpose),
        ] {
            if segment.is_empty() || segment.contains('/') || segment.contains("..") {
                return Err(anyhow::anyhow!(
                    "{} must be a single non-empty path segment",
                    name
                ));
            }
        }

        // Validate storage backend configuration
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        Ok(())
    }
}
