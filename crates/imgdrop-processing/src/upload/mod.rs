//! Upload orchestration: validate → re-encode → key → store → URL.

pub mod pipeline;
pub mod types;

pub use pipeline::upload_image;
pub use types::{UploadContext, UploadOutcome};
