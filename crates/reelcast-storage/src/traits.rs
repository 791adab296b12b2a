//! Storage abstraction trait
//!
//! This module defines the Storage trait that signing backends must implement.
//! The application never moves upload bytes itself: it only signs a write
//! permission and computes where the object will be readable afterwards.

use async_trait::async_trait;
use reelcast_core::AppError;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::SigningFailed(msg) => AppError::UpstreamConfiguration(msg),
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
        }
    }
}

/// Storage abstraction trait
///
/// **Key format:** staged uploads live under `{staging}/[{folder}/]{uuid}`.
/// See the `keys` module.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Generate a presigned PUT URL for one direct upload to `storage_key`.
    ///
    /// The URL authorizes a single object key only; expiry is enforced by the
    /// storage service itself once `expires_in` has elapsed.
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Public location of `storage_key` once an upload has completed.
    ///
    /// Must be computable before the object exists.
    fn public_url(&self, storage_key: &str) -> String;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
