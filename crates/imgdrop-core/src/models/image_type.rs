//! Allowed image types and their encoder profiles.
//!
//! Every accepted media type has exactly one row in [`ENCODER_PROFILES`]. The row
//! carries everything format-specific: the canonical MIME type and extension, which
//! encoder writes it, and the settings that encoder uses when an oversized upload
//! has to be re-encoded. Supporting another format means adding a variant and a row.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Image types accepted for upload.
///
/// The discriminant is the row index in [`ENCODER_PROFILES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowedType {
    Jpeg = 0,
    Png = 1,
    WebP = 2,
}

/// Which encoder produces the bytes for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderId {
    Jpeg,
    Png,
    WebP,
}

/// Format-specific encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderProfile {
    pub allowed_type: AllowedType,
    pub mime_type: &'static str,
    /// Canonical filename extension, including the leading dot.
    pub extension: &'static str,
    pub encoder: EncoderId,
    /// Lossy quality on a 0-100 scale; `None` for lossless encoders.
    pub quality: Option<u8>,
    /// Encoder effort: zlib level for PNG (9 = best), method for WebP (6 = slowest).
    /// Unused by JPEG.
    pub effort: u8,
    /// The encoder cannot carry alpha or non-RGB color models.
    pub requires_rgb: bool,
    /// Optimized Huffman tables (JPEG only).
    pub optimize_coding: bool,
    /// Progressive scan layout (JPEG only).
    pub progressive: bool,
}

pub const ENCODER_PROFILES: [EncoderProfile; 3] = [
    EncoderProfile {
        allowed_type: AllowedType::Jpeg,
        mime_type: "image/jpeg",
        extension: ".jpg",
        encoder: EncoderId::Jpeg,
        quality: Some(85),
        effort: 0,
        requires_rgb: true,
        optimize_coding: true,
        progressive: true,
    },
    EncoderProfile {
        allowed_type: AllowedType::Png,
        mime_type: "image/png",
        extension: ".png",
        encoder: EncoderId::Png,
        quality: None,
        effort: 9,
        requires_rgb: false,
        optimize_coding: false,
        progressive: false,
    },
    EncoderProfile {
        allowed_type: AllowedType::WebP,
        mime_type: "image/webp",
        extension: ".webp",
        encoder: EncoderId::WebP,
        quality: Some(85),
        effort: 6,
        requires_rgb: false,
        optimize_coding: false,
        progressive: false,
    },
];

impl AllowedType {
    /// Parse a declared content type.
    ///
    /// Matching is case-insensitive, ignores surrounding whitespace and drops any
    /// `;`-parameters. Aliases such as `image/jpg` are not accepted.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        ENCODER_PROFILES
            .iter()
            .find(|profile| profile.mime_type == essence)
            .map(|profile| profile.allowed_type)
    }

    pub fn profile(self) -> &'static EncoderProfile {
        &ENCODER_PROFILES[self as usize]
    }

    pub fn mime_type(self) -> &'static str {
        self.profile().mime_type
    }

    pub fn extension(self) -> &'static str {
        self.profile().extension
    }
}

impl Display for AllowedType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.mime_type())
    }
}
