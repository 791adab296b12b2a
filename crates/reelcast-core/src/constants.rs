//! Shared constants.

/// Lifetime of a presigned upload URL. Expiry is enforced by the storage layer.
pub const UPLOAD_GRANT_TTL_SECS: u64 = 300;

/// Default namespace for staged (not yet published) uploads.
pub const DEFAULT_STAGING_PREFIX: &str = "temp";

/// Namespaces reserved for published content; staged uploads must never land here.
pub const PUBLISHED_PREFIXES: &[&str] = &["media", "published", "public"];

/// Provider accepts exactly one image reference per job.
pub const MAX_IMAGES_PER_JOB: usize = 1;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://pollo.ai/api/platform";
pub const DEFAULT_PROVIDER_MODEL_PATH: &str = "generation/google/veo3-1";
pub const DEFAULT_PROVIDER_RESOLUTION: &str = "720p";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "auth-token";
pub const USERNAME_COOKIE_NAME: &str = "username";
/// Seven days.
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;
