//! Domain models for the upload pipeline.

pub mod image_type;
pub mod upload;

pub use image_type::{AllowedType, EncoderId, EncoderProfile};
pub use upload::UploadRequest;
