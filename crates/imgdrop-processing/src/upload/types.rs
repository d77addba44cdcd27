//! Types for the upload pipeline.

use std::sync::Arc;

use imgdrop_core::ImageStoreConfig;
use imgdrop_storage::{KeyLayout, Storage};
use serde::Serialize;

use crate::reencoder::{AdaptiveReencoder, ReencodeSettings};
use crate::validator::ImageValidator;

/// Everything an upload needs besides the request itself.
///
/// Immutable and cheap to clone; share one per process.
#[derive(Clone)]
pub struct UploadContext {
    pub storage: Arc<dyn Storage>,
    pub validator: ImageValidator,
    pub reencoder: AdaptiveReencoder,
    pub key_layout: KeyLayout,
}

impl UploadContext {
    /// Context with the default budget, edges and key layout.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            validator: ImageValidator::default(),
            reencoder: AdaptiveReencoder::default(),
            key_layout: KeyLayout::default(),
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, config: &ImageStoreConfig) -> Self {
        Self {
            storage,
            validator: ImageValidator::default(),
            reencoder: AdaptiveReencoder::new(ReencodeSettings::from(config)),
            key_layout: KeyLayout::new(config.key_namespace.clone(), config.key_purpose.clone()),
        }
    }

    pub fn with_reencode_settings(mut self, settings: ReencodeSettings) -> Self {
        self.reencoder = AdaptiveReencoder::new(settings);
        self
    }

    pub fn max_image_bytes(&self) -> usize {
        self.reencoder.settings().max_bytes
    }
}

/// Result of a successful upload.
#[derive(Clone, Debug, Serialize)]
pub struct UploadOutcome {
    pub url: String,
    pub key: String,
    pub content_type: String,
    /// Bytes actually stored.
    pub size_bytes: usize,
    pub original_size_bytes: usize,
    pub reencoded: bool,
}
