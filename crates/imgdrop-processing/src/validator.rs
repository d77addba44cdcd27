use imgdrop_core::models::image_type::ENCODER_PROFILES;
use imgdrop_core::{AllowedType, UploadError};

/// Validation errors for uploaded images
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for UploadError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidContentType {
                content_type,
                allowed,
            } => UploadError::UnsupportedMediaType {
                content_type,
                allowed,
            },
            ValidationError::EmptyFile => UploadError::EmptyPayload,
        }
    }
}

/// Image upload validator
///
/// Checks the declared content type against the allowed types and rejects empty
/// payloads. Size limits are not enforced here: oversized images are re-encoded
/// rather than rejected.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    allowed_types: Vec<AllowedType>,
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new(ENCODER_PROFILES.iter().map(|p| p.allowed_type).collect())
    }
}

impl ImageValidator {
    pub fn new(allowed_types: Vec<AllowedType>) -> Self {
        Self { allowed_types }
    }

    fn allowed_mime_types(&self) -> Vec<String> {
        self.allowed_types
            .iter()
            .map(|t| t.mime_type().to_string())
            .collect()
    }

    /// Validate content type
    pub fn validate_content_type(&self, content_type: &str) -> Result<AllowedType, ValidationError> {
        AllowedType::from_content_type(content_type)
            .filter(|allowed| self.allowed_types.contains(allowed))
            .ok_or_else(|| ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_mime_types(),
            })
    }

    /// Validate that the payload carries at least one byte
    pub fn validate_not_empty(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        Ok(())
    }

    /// Run all validations
    ///
    /// The content type is checked first, so an empty `text/plain` upload reports
    /// the unsupported type.
    pub fn validate(&self, content_type: &str, data: &[u8]) -> Result<AllowedType, ValidationError> {
        let allowed = self.validate_content_type(content_type)?;
        self.validate_not_empty(data.len())?;
        Ok(allowed)
    }
}
