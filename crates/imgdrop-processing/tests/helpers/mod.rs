//! Test helpers for the upload pipeline integration tests.
//!
//! Run from workspace root: `cargo test -p imgdrop-processing --test upload_test`.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use std::sync::Arc;

use imgdrop_processing::{ReencodeSettings, UploadContext};
use imgdrop_storage::Storage;

/// Context over `storage` with a custom size budget and the default edges.
pub fn context_with_budget(storage: Arc<dyn Storage>, max_bytes: usize) -> UploadContext {
    UploadContext::new(storage).with_reencode_settings(ReencodeSettings {
        max_bytes,
        ..Default::default()
    })
}

/// True when `token` is 32 lowercase hex characters.
pub fn is_hex_token(token: &str) -> bool {
    token.len() == 32
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
