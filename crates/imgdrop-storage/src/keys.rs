//! Storage key derivation.
//!
//! Key format: `<namespace>/<user_id>/<purpose>/<token><ext>`.

use imgdrop_core::constants::{
    DEFAULT_KEY_NAMESPACE, DEFAULT_KEY_PURPOSE, MAX_FILENAME_EXTENSION_LEN,
};
use imgdrop_core::AllowedType;
use std::path::Path;
use uuid::Uuid;

/// Namespace and purpose segments wrapped around the user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    pub namespace: String,
    pub purpose: String,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_KEY_NAMESPACE.to_string(),
            purpose: DEFAULT_KEY_PURPOSE.to_string(),
        }
    }
}

impl KeyLayout {
    pub fn new(namespace: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            purpose: purpose.into(),
        }
    }
}

/// Generate a storage key for an upload.
///
/// Deterministic apart from the 128-bit random token.
pub fn derive_storage_key(
    layout: &KeyLayout,
    user_id: i64,
    filename: Option<&str>,
    content_type: &str,
) -> String {
    let token = Uuid::new_v4().simple();
    let extension = key_extension(filename, content_type);
    format!(
        "{}/{}/{}/{}{}",
        layout.namespace, user_id, layout.purpose, token, extension
    )
}

/// Pick the extension (with leading dot) for a key, or an empty string.
///
/// The declared content type wins when it is an allowed type. Otherwise the
/// lowercased extension of the original filename is used if it is at most
/// ten characters long including the dot. A name ending in a bare dot
/// (`trailing.`) or a dot-file (`.bashrc`) has no extension, so no dot is kept.
pub fn key_extension(filename: Option<&str>, content_type: &str) -> String {
    if let Some(allowed) = AllowedType::from_content_type(content_type) {
        return allowed.extension().to_string();
    }

    filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .filter(|ext| ext.chars().count() <= MAX_FILENAME_EXTENSION_LEN)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_layout() {
        let key = derive_storage_key(&KeyLayout::default(), 42, Some("me.JPG"), "image/jpeg");
        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "users");
        assert_eq!(parts[1], "42");
        assert_eq!(parts[2], "profile");

        let file = parts[3];
        assert!(file.ends_with(".jpg"));
        let token = file.trim_end_matches(".jpg");
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_custom_layout() {
        let layout = KeyLayout::new("members", "avatar");
        let key = derive_storage_key(&layout, 7, None, "image/webp");
        assert!(key.starts_with("members/7/avatar/"));
        assert!(key.ends_with(".webp"));
    }

    #[test]
    fn test_keys_are_unique_for_identical_inputs() {
        let layout = KeyLayout::default();
        let keys: HashSet<String> = (0..1000)
            .map(|_| derive_storage_key(&layout, 1, Some("a.png"), "image/png"))
            .collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_content_type_extension_wins_over_filename() {
        assert_eq!(key_extension(Some("photo.gif"), "image/png"), ".png");
        assert_eq!(key_extension(None, "image/jpeg"), ".jpg");
        assert_eq!(key_extension(Some("x"), "IMAGE/WEBP"), ".webp");
    }

    #[test]
    fn test_filename_extension_fallback() {
        assert_eq!(key_extension(Some("scan.TIFF"), "image/tiff"), ".tiff");
        assert_eq!(key_extension(Some("dir/archive.tar.gz"), "application/gzip"), ".gz");
    }

    #[test]
    fn test_filename_extension_length_limit() {
        // ".abcdefghi" is exactly ten characters including the dot
        assert_eq!(
            key_extension(Some("f.abcdefghi"), "application/x-custom"),
            ".abcdefghi"
        );
        assert_eq!(key_extension(Some("f.abcdefghij"), "application/x-custom"), "");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(key_extension(None, "text/plain"), "");
        assert_eq!(key_extension(Some("README"), "text/plain"), "");
        assert_eq!(key_extension(Some(".bashrc"), "text/plain"), "");
        assert_eq!(key_extension(Some("trailing."), "text/plain"), "");
    }
}
