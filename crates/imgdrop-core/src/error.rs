//! Error types module
//!
//! Every failure the upload pipeline can report is a variant of [`UploadError`].
//! Lower layers keep their own `thiserror` enums (validation, re-encoding, storage)
//! and convert into this one at the orchestrator boundary, so callers match on a
//! single taxonomy and pick an HTTP status through [`ErrorMetadata`].

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "EMPTY_PAYLOAD")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Empty payload")]
    EmptyPayload,

    #[error("Unsupported media type: {content_type} (allowed: {allowed:?})")]
    UnsupportedMediaType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid image data: {0}")]
    InvalidImageData(String),

    #[error("Image too large: {size} bytes after re-encoding (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Object store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn upload_error_static_metadata(
    err: &UploadError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        UploadError::EmptyPayload => (
            400,
            "EMPTY_PAYLOAD",
            false,
            Some("Attach a non-empty image file"),
            false,
            LogLevel::Debug,
        ),
        UploadError::UnsupportedMediaType { .. } => (
            415,
            "UNSUPPORTED_MEDIA_TYPE",
            false,
            Some("Upload a JPEG, PNG or WEBP image"),
            false,
            LogLevel::Debug,
        ),
        UploadError::InvalidImageData(_) => (
            400,
            "INVALID_IMAGE_DATA",
            false,
            Some("Check image format and try a different file"),
            false,
            LogLevel::Warn,
        ),
        UploadError::PayloadTooLarge { .. } => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce image size and try again"),
            false,
            LogLevel::Debug,
        ),
        UploadError::StoreUnavailable(_) => (
            502,
            "STORE_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        UploadError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for UploadError {
    fn http_status_code(&self) -> u16 {
        upload_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        upload_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        upload_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::EmptyPayload => "The uploaded file is empty".to_string(),
            UploadError::UnsupportedMediaType { .. } => {
                "Only JPEG, PNG and WEBP images can be uploaded".to_string()
            }
            UploadError::InvalidImageData(_) => "The image could not be decoded".to_string(),
            UploadError::PayloadTooLarge { max, .. } => {
                format!("Images must be {} bytes or smaller", max)
            }
            UploadError::StoreUnavailable(_) => "Failed to store the image".to_string(),
            UploadError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
