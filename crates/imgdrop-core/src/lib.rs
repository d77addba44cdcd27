//! imgdrop Core Library
//!
//! Shared domain types for the image upload pipeline: the allowed image types and
//! their encoder profiles, the upload request, configuration, and the error
//! taxonomy every layer reports into.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::ImageStoreConfig;
pub use error::{ErrorMetadata, LogLevel, UploadError};
pub use models::{AllowedType, EncoderId, EncoderProfile, UploadRequest};
pub use storage_types::StorageBackend;
