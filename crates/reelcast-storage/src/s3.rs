use crate::keys::join_public_url;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Builder as S3ConfigBuilder, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use reelcast_core::StorageConfig;
use std::time::Duration;

/// S3-compatible storage that signs direct uploads
///
/// Works against AWS S3 and compatible services such as Cloudflare R2 or MinIO.
/// Only request signing happens here; no object data passes through this type.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    /// Create a new S3Storage instance from explicit settings.
    ///
    /// Credentials are taken from `config` only, never from the ambient AWS
    /// environment, so the signer always uses the account the grant is issued for.
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let missing = config.missing_settings();
        if !missing.is_empty() {
            return Err(StorageError::ConfigError(format!(
                "Missing storage settings: {}",
                missing.join(", ")
            )));
        }

        let bucket = config.bucket.clone().unwrap_or_default();
        let public_base_url = config.public_base_url.clone().unwrap_or_default();

        let credentials = Credentials::new(
            config.access_key_id.clone().unwrap_or_default(),
            config.secret_access_key.clone().unwrap_or_default(),
            None,
            None,
            "reelcast-config",
        );

        let mut builder = S3ConfigBuilder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint.clone()).force_path_style(true);
        }

        Ok(S3Storage {
            client: Client::from_conf(builder.build()),
            bucket,
            public_base_url,
        })
    }
}

#[async_trait]
impl Storage for S3Storage {
    /// The content type is part of the signature: the upload must send the same
    /// `Content-Type` header or storage rejects it.
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let start = std::time::Instant::now();

        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(storage_key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 PUT signing failed"
                );
                StorageError::SigningFailed(e.to_string())
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            expires_in_secs = expires_in.as_secs(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 PUT URL signed"
        );

        Ok(request.uri().to_string())
    }

    fn public_url(&self, storage_key: &str) -> String {
        join_public_url(&self.public_base_url, storage_key)
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
