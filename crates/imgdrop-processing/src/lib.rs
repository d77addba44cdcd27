//! imgdrop Image Processing Library
//!
//! The upload pipeline: validate → (re-encode when oversized) → derive key →
//! put → derive URL.

pub mod compression;
pub mod reencoder;
pub mod upload;
pub mod validator;

// Re-export commonly used types
pub use compression::ImageCompressor;
pub use reencoder::{candidate_edges, AdaptiveReencoder, ReencodeError, ReencodeOutcome, ReencodeSettings};
pub use upload::{upload_image, UploadContext, UploadOutcome};
pub use validator::{ImageValidator, ValidationError};
