//! Storage abstraction trait
//!
//! This module defines the Storage trait the upload pipeline writes through.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Transport or service failure talking to the store, including timeouts.
    /// Carries the underlying message for diagnostics.
    #[error("Object store unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Record of a successful put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub size_bytes: usize,
    pub content_type: String,
    pub e_tag: Option<String>,
}

/// Storage abstraction trait
///
/// The pipeline only ever creates objects: one `put` per successful upload, under
/// a key nobody else will produce. No retries happen behind this trait.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key` with the given content type.
    async fn put(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<StoredObject>;

    /// Publicly addressable URL for a stored key. Pure; performs no I/O.
    fn public_url(&self, storage_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

impl From<StorageError> for imgdrop_core::UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => imgdrop_core::UploadError::StoreUnavailable(msg),
            StorageError::ConfigError(msg) => imgdrop_core::UploadError::Internal(msg),
        }
    }
}
