//! Adaptive re-encoding for oversized uploads.
//!
//! The image is decoded once, then encoded at a shrinking sequence of maximum edge
//! lengths until the result fits the byte budget or the dimension floor is reached.

use crate::compression::ImageCompressor;
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use imgdrop_core::constants::{DIMENSION_FLOOR, INITIAL_MAX_EDGE, MAX_IMAGE_BYTES};
use imgdrop_core::{AllowedType, ImageStoreConfig, UploadError};

#[derive(Debug, thiserror::Error)]
pub enum ReencodeError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

impl From<ReencodeError> for UploadError {
    fn from(err: ReencodeError) -> Self {
        UploadError::InvalidImageData(err.to_string())
    }
}

/// Longest-edge candidates, largest first.
///
/// Each value is the previous one times 0.8 (integer arithmetic); the list ends with
/// the first value at or below `floor`.
pub fn candidate_edges(initial_max_edge: u32, floor: u32) -> Vec<u32> {
    std::iter::successors(Some(initial_max_edge), |&edge| {
        (edge > floor && edge > 0).then(|| (edge as u64 * 4 / 5) as u32)
    })
    .collect()
}

/// Target dimensions so the longest side is at most `max_edge`.
///
/// Aspect ratio is kept, the shorter side is floored (minimum 1) and nothing is
/// ever upscaled.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_edge {
        return (width, height);
    }

    let scale = |side: u32| ((side as u64 * max_edge as u64) / longest as u64).max(1) as u32;
    if width >= height {
        (max_edge, scale(height))
    } else {
        (scale(width), max_edge)
    }
}

/// Pick a resampling filter by downscale ratio
fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReencodeSettings {
    pub max_bytes: usize,
    pub initial_max_edge: u32,
    pub dimension_floor: u32,
}

impl Default for ReencodeSettings {
    fn default() -> Self {
        Self {
            max_bytes: MAX_IMAGE_BYTES,
            initial_max_edge: INITIAL_MAX_EDGE,
            dimension_floor: DIMENSION_FLOOR,
        }
    }
}

impl From<&ImageStoreConfig> for ReencodeSettings {
    fn from(config: &ImageStoreConfig) -> Self {
        Self {
            max_bytes: config.max_image_bytes,
            initial_max_edge: config.initial_max_edge,
            dimension_floor: config.dimension_floor,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReencodeOutcome {
    pub data: Vec<u8>,
    /// Edge limit of the encode that was kept.
    pub max_edge: u32,
    pub width: u32,
    pub height: u32,
    pub attempts: usize,
}

impl ReencodeOutcome {
    pub fn fits(&self, max_bytes: usize) -> bool {
        self.data.len() <= max_bytes
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveReencoder {
    settings: ReencodeSettings,
}

impl AdaptiveReencoder {
    pub fn new(settings: ReencodeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ReencodeSettings {
        &self.settings
    }

    pub fn candidate_edges(&self) -> Vec<u32> {
        candidate_edges(self.settings.initial_max_edge, self.settings.dimension_floor)
    }

    /// Shrink and recompress until the encoding fits the budget.
    ///
    /// Returns the first encoding within budget, or the encoding at the last
    /// candidate edge when none fits. Callers compare the size against the budget.
    /// This is CPU-bound; run it on a blocking thread.
    pub fn reencode(&self, data: &[u8], allowed: AllowedType) -> Result<ReencodeOutcome, ReencodeError> {
        let profile = allowed.profile();
        let img = ImageCompressor::prepare(ImageCompressor::decode(data, allowed)?, profile);
        let (orig_width, orig_height) = img.dimensions();

        let mut outcome: Option<ReencodeOutcome> = None;
        for (index, edge) in self.candidate_edges().into_iter().enumerate() {
            let (width, height) = fit_within(orig_width, orig_height, edge);
            let encoded = if (width, height) == (orig_width, orig_height) {
                ImageCompressor::encode(&img, profile)?
            } else {
                let filter = select_filter(orig_width, orig_height, width, height);
                let resized: DynamicImage = img.resize_exact(width, height, filter);
                ImageCompressor::encode(&resized, profile)?
            };

            tracing::debug!(
                content_type = %allowed,
                attempt = index + 1,
                max_edge = edge,
                width,
                height,
                size_bytes = encoded.len(),
                max_bytes = self.settings.max_bytes,
                "Re-encode attempt"
            );

            let fits = encoded.len() <= self.settings.max_bytes;
            outcome = Some(ReencodeOutcome {
                data: encoded,
                max_edge: edge,
                width,
                height,
                attempts: index + 1,
            });
            if fits {
                break;
            }
        }

        outcome.ok_or_else(|| ReencodeError::Encode("no candidate edge to encode at".to_string()))
    }
}
