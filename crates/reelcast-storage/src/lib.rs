//! Reelcast Storage Library
//!
//! This crate provides the object-storage signing abstraction for Reelcast:
//! the Storage trait, its S3-compatible implementation, and the Upload Grant
//! Issuer built on top of them.
//!
//! # Storage key format
//!
//! Grant keys always live in the staging namespace, never under a
//! published-content prefix:
//!
//! - `{staging}/{uuid}`
//! - `{staging}/{folder}/{uuid}` when the caller names a folder
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module.

pub mod factory;
pub mod grants;
pub(crate) mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use grants::UploadGrantIssuer;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
