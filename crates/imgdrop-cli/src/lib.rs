use std::path::Path;

/// Content type sent when a file's extension names no accepted image type.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Guess a content type from a file extension.
///
/// Unknown extensions map to [`FALLBACK_CONTENT_TYPE`], which the pipeline rejects
/// as unsupported.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => FALLBACK_CONTENT_TYPE,
    }
}


/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr so stdout carries only the JSON result.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
