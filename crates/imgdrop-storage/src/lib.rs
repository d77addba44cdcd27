//! imgdrop Storage Library
//!
//! Storage key derivation, public URL derivation and the object store client used
//! by the upload pipeline.
//!
//! # Storage key format
//!
//! `<namespace>/<user_id>/<purpose>/<token><ext>`, for example
//! `users/42/profile/9f1c0d2e8a7b4c3d9e0f1a2b3c4d5e6f.jpg`. The token is 128 random
//! bits rendered as hex, so keys never collide in practice and objects are never
//! overwritten. Key generation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
pub mod object;
pub mod traits;
pub mod url;

// Re-export commonly used types
pub use factory::create_storage;
pub use imgdrop_core::StorageBackend;
pub use keys::{derive_storage_key, key_extension, KeyLayout};
pub use object::ObjectStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
pub use url::PublicUrlConfig;
