//! Upload Grant Issuer
//!
//! Mints single-key, time-bound PUT permissions into the staging namespace.

use crate::keys::generate_staging_key;
use crate::traits::Storage;
use chrono::Utc;
use reelcast_core::constants::UPLOAD_GRANT_TTL_SECS;
use reelcast_core::models::UploadGrant;
use reelcast_core::validation::validate_content_type;
use reelcast_core::AppError;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on one signing call.
pub const DEFAULT_SIGNING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct UploadGrantIssuer {
    storage: Option<Arc<dyn Storage>>,
    staging_prefix: String,
    signing_timeout: Duration,
}

impl UploadGrantIssuer {
    pub fn new(storage: Option<Arc<dyn Storage>>, staging_prefix: impl Into<String>) -> Self {
        Self {
            storage,
            staging_prefix: staging_prefix.into(),
            signing_timeout: DEFAULT_SIGNING_TIMEOUT,
        }
    }

    pub fn with_signing_timeout(mut self, timeout: Duration) -> Self {
        self.signing_timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.storage.is_some()
    }

    /// Issue a grant for one upload of `content_type`.
    ///
    /// Input is validated before storage configuration is consulted, so a bad
    /// request is reported as such even on a server without storage.
    #[tracing::instrument(skip(self), fields(operation = "issue_upload_grant"))]
    pub async fn issue_grant(
        &self,
        content_type: Option<&str>,
        folder: Option<&str>,
    ) -> Result<UploadGrant, AppError> {
        let content_type = validate_content_type(content_type)?;

        let storage = self.storage.as_ref().ok_or_else(|| {
            AppError::Configuration("Object storage is not configured".to_string())
        })?;

        let object_key = generate_staging_key(&self.staging_prefix, folder)?;
        let ttl = Duration::from_secs(UPLOAD_GRANT_TTL_SECS);
        let issued_at = Utc::now();

        let write_url = tokio::time::timeout(
            self.signing_timeout,
            storage.presigned_put_url(&object_key, &content_type, ttl),
        )
        .await
        .map_err(|_| {
            tracing::error!(
                key = %object_key,
                timeout_ms = self.signing_timeout.as_millis() as u64,
                "Upload URL signing timed out"
            );
            AppError::UpstreamUnavailable("Storage signing timed out".to_string())
        })??;

        let public_reference = storage.public_url(&object_key);

        tracing::info!(
            key = %object_key,
            content_type = %content_type,
            backend = storage.backend_name(),
            expires_in_secs = UPLOAD_GRANT_TTL_SECS,
            "Upload grant issued"
        );

        Ok(UploadGrant {
            object_key,
            write_url,
            public_reference,
            expires_at: issued_at + chrono::Duration::seconds(UPLOAD_GRANT_TTL_SECS as i64),
            expires_in: UPLOAD_GRANT_TTL_SECS,
        })
    }
}
