//! Key generation for staged uploads.
//!
//! Key format: `{staging}/{uuid}` or `{staging}/{folder}/{uuid}`. Every segment
//! is reduced to `[A-Za-z0-9_-]`, so keys never contain `..` or a leading `/`.

use crate::traits::{StorageError, StorageResult};
use reelcast_core::validation::sanitize_path_segment;
use uuid::Uuid;

/// Generate a fresh staging key.
///
/// Uniqueness comes from a random v4 UUID, so concurrent callers need no
/// coordination.
pub fn generate_staging_key(staging_prefix: &str, folder: Option<&str>) -> StorageResult<String> {
    let staging = sanitize_path_segment(staging_prefix);
    if staging.is_empty() {
        return Err(StorageError::InvalidKey(format!(
            "Staging prefix '{}' is empty after sanitization",
            staging_prefix
        )));
    }

    let id = Uuid::new_v4();
    let folder = folder.map(sanitize_path_segment).filter(|f| !f.is_empty());
    Ok(match folder {
        Some(folder) => format!("{}/{}/{}", staging, folder, id),
        None => format!("{}/{}", staging, id),
    })
}

/// Join a public base URL and a key without doubling the separator.
pub fn join_public_url(base_url: &str, storage_key: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        storage_key.trim_start_matches('/')
    )
}
