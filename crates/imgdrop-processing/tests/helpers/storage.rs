//! Storage doubles for pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use imgdrop_storage::{
    ObjectStorage, PublicUrlConfig, Storage, StorageBackend, StorageError, StorageResult,
    StoredObject,
};
use object_store::path::Path;
use object_store::{Attribute, ObjectStoreExt};

/// In-memory object storage plus a handle for reading objects back.
pub struct TestStorage {
    pub storage: ObjectStorage,
}

impl TestStorage {
    pub fn new() -> Self {
        let urls = PublicUrlConfig::new("avatars", "eu-west-1");
        Self {
            storage: ObjectStorage::in_memory(urls, Duration::from_secs(5)),
        }
    }

    pub fn as_storage(&self) -> Arc<dyn Storage> {
        Arc::new(self.storage.clone())
    }

    /// Stored bytes and content type for `key`.
    pub async fn read(&self, key: &str) -> (Vec<u8>, Option<String>) {
        let result = self
            .storage
            .inner()
            .get(&Path::from(key))
            .await
            .expect("Object should exist");
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| AsRef::<str>::as_ref(v).to_string());
        let bytes = result.bytes().await.expect("Failed to read object");
        (bytes.to_vec(), content_type)
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects every put with a transport error and counts the attempts.
#[derive(Default)]
pub struct FailingStorage {
    pub puts: AtomicUsize,
}

impl FailingStorage {
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put(
        &self,
        _storage_key: &str,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<StoredObject> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable(
            "error sending request: connection reset by peer".to_string(),
        ))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("https://failing.example/{}", storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
