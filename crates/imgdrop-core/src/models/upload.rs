//! Upload request as handed over by the inbound boundary.

/// A user-submitted image.
///
/// Built once by the host (multipart handler, CLI) and consumed by the pipeline,
/// which takes ownership of `data` for the duration of the call.
#[derive(Clone)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    pub content_type: String,
    pub filename: Option<String>,
    pub user_id: i64,
}

impl UploadRequest {
    pub fn new(
        data: Vec<u8>,
        content_type: impl Into<String>,
        filename: Option<String>,
        user_id: i64,
    ) -> Self {
        Self {
            data,
            content_type: content_type.into(),
            filename,
            user_id,
        }
    }
}

impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("size_bytes", &self.data.len())
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .field("user_id", &self.user_id)
            .finish()
    }
}
