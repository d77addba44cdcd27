//! Upload pipeline: validate → re-encode (oversized only) → key → store → URL.
//!
//! Nothing touches the object store until the payload has passed validation and,
//! when needed, been brought within the size budget.

use std::time::Instant;

use imgdrop_core::{UploadError, UploadRequest};
use imgdrop_storage::derive_storage_key;

use super::types::{UploadContext, UploadOutcome};

/// Run the upload pipeline and return where the image can be fetched.
///
/// Inputs within the budget are stored byte-for-byte. Larger inputs are
/// re-encoded on the blocking pool; if they still do not fit at the dimension
/// floor the upload fails with [`UploadError::PayloadTooLarge`].
pub async fn upload_image(
    request: UploadRequest,
    ctx: &UploadContext,
) -> Result<UploadOutcome, UploadError> {
    let start = Instant::now();
    let UploadRequest {
        data,
        content_type,
        filename,
        user_id,
    } = request;

    let allowed = ctx.validator.validate(&content_type, &data)?;

    let original_size = data.len();
    let max_bytes = ctx.max_image_bytes();
    let (data, reencoded) = if original_size > max_bytes {
        let reencoder = ctx.reencoder;
        let outcome = tokio::task::spawn_blocking(move || reencoder.reencode(&data, allowed))
            .await
            .map_err(|e| UploadError::Internal(format!("Re-encode task failed: {}", e)))??;

        if !outcome.fits(max_bytes) {
            tracing::debug!(
                user_id,
                content_type = %allowed,
                original_size,
                size_bytes = outcome.data.len(),
                max_bytes,
                attempts = outcome.attempts,
                "Image still too large at dimension floor"
            );
            return Err(UploadError::PayloadTooLarge {
                size: outcome.data.len(),
                max: max_bytes,
            });
        }

        tracing::debug!(
            user_id,
            original_size,
            size_bytes = outcome.data.len(),
            width = outcome.width,
            height = outcome.height,
            attempts = outcome.attempts,
            "Image re-encoded to fit size budget"
        );
        (outcome.data, true)
    } else {
        (data, false)
    };

    let storage_key = derive_storage_key(
        &ctx.key_layout,
        user_id,
        filename.as_deref(),
        allowed.mime_type(),
    );

    let stored = ctx
        .storage
        .put(&storage_key, data, allowed.mime_type())
        .await?;

    let url = ctx.storage.public_url(&stored.key);

    tracing::info!(
        user_id,
        key = %stored.key,
        size_bytes = stored.size_bytes,
        reencoded,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Image uploaded"
    );

    Ok(UploadOutcome {
        url,
        key: stored.key,
        content_type: stored.content_type,
        size_bytes: stored.size_bytes,
        original_size_bytes: original_size,
        reencoded,
    })
}
