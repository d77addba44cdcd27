//! Pipeline defaults.

/// Maximum stored image size in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Longest-edge length the re-encoder starts from.
pub const INITIAL_MAX_EDGE: u32 = 1024;

/// The re-encoder never shrinks the longest edge past this value.
pub const DIMENSION_FLOOR: u32 = 320;

/// First path segment of every storage key.
pub const DEFAULT_KEY_NAMESPACE: &str = "users";

/// Path segment naming what the stored image is for.
pub const DEFAULT_KEY_PURPOSE: &str = "profile";

/// Region whose public URLs omit the region segment.
pub const DEFAULT_S3_REGION: &str = "us-east-1";

/// Upper bound for a single object store call.
pub const STORAGE_TIMEOUT_SECS: u64 = 30;

/// Longest filename extension (including the dot) carried into a storage key.
pub const MAX_FILENAME_EXTENSION_LEN: usize = 10;
