#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageResult};
use reelcast_core::StorageConfig;
use std::sync::Arc;

/// Create the signing backend from configuration.
///
/// Returns `Ok(None)` when storage settings are incomplete: the service still
/// starts and upload grant requests fail with a configuration error.
pub fn create_storage(config: &StorageConfig) -> StorageResult<Option<Arc<dyn Storage>>> {
    if !config.is_configured() {
        tracing::warn!(
            missing = ?config.missing_settings(),
            "Object storage not configured; upload grants are disabled"
        );
        return Ok(None);
    }

    #[cfg(feature = "storage-s3")]
    {
        let storage = S3Storage::new(config)?;
        tracing::info!(
            bucket = ?config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "S3 storage initialized"
        );
        Ok(Some(Arc::new(storage)))
    }

    #[cfg(not(feature = "storage-s3"))]
    {
        Err(crate::StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        ))
    }
}
