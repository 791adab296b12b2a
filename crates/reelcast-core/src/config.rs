//! Configuration module
//!
//! This module provides configuration structures for the API and its
//! collaborators: the generation provider, the object storage signer and the
//! session gate. Configuration is loaded once at startup and handed to each
//! component explicitly.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::constants::{
    DEFAULT_PROVIDER_BASE_URL, DEFAULT_PROVIDER_MODEL_PATH, DEFAULT_PROVIDER_RESOLUTION,
    DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_MAX_AGE_SECS,
    DEFAULT_STAGING_PREFIX, PUBLISHED_PREFIXES,
};
use crate::validation::sanitize_path_segment;

const SERVER_PORT: u16 = 3000;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const MAX_PROVIDER_TIMEOUT_SECS: u64 = 300;
const MIN_SESSION_SECRET_LEN: usize = 32;

/// Settings shared by every surface of the service
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
}

/// External generation provider settings
#[derive(Clone)]
pub struct ProviderConfig {
    /// Provider credential. `None` means submission and polling answer with a configuration error.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_path: String,
    pub resolution: String,
    pub generate_audio: bool,
    pub timeout_secs: u64,
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model_path", &self.model_path)
            .field("resolution", &self.resolution)
            .field("generate_audio", &self.generate_audio)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// S3-compatible object storage settings used to sign upload grants
#[derive(Clone)]
pub struct StorageConfig {
    pub endpoint: Option<String>,
    pub region: String,
    pub bucket: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub public_base_url: Option<String>,
    pub staging_prefix: String,
}

impl StorageConfig {
    /// Storage can sign grants only when every required setting is present.
    pub fn is_configured(&self) -> bool {
        self.bucket.is_some()
            && self.access_key_id.is_some()
            && self.secret_access_key.is_some()
            && self.public_base_url.is_some()
    }

    /// Names of the settings that are still missing, for startup diagnostics.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bucket.is_none() {
            missing.push("S3_BUCKET");
        }
        if self.access_key_id.is_none() {
            missing.push("S3_ACCESS_KEY_ID");
        }
        if self.secret_access_key.is_none() {
            missing.push("S3_SECRET_ACCESS_KEY");
        }
        if self.public_base_url.is_none() {
            missing.push("PUBLIC_BASE_URL");
        }
        missing
    }
}

impl Debug for StorageConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field(
                "access_key_id",
                &self.access_key_id.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("public_base_url", &self.public_base_url)
            .field("staging_prefix", &self.staging_prefix)
            .finish()
    }
}

/// Session cookie settings
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC secret used to verify session tokens. `None` disables the gate outside production.
    pub secret: Option<String>,
    pub cookie_name: String,
    pub max_age_secs: i64,
}

impl Debug for SessionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SessionConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("cookie_name", &self.cookie_name)
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}

/// Complete service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn as_service(&self) -> &ServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_service().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_service().base.http_concurrency_limit
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.as_service().provider
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.as_service().storage
    }

    pub fn session(&self) -> &SessionConfig {
        &self.as_service().session
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset. Where two names are listed, the first
    /// wins and the second is the Cloudflare R2 spelling used by older deployments.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let either = |primary: &str, fallback: &str| var(primary).or_else(|| var(fallback));

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let generate_audio = match var("PROVIDER_GENERATE_AUDIO") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "PROVIDER_GENERATE_AUDIO must be one of true/false, 1/0, yes/no, on/off (got {:?})",
                    raw
                )
            })?,
            None => false,
        };

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = ServiceConfig {
            base: BaseConfig {
                server_port: var("SERVER_PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(SERVER_PORT),
                cors_origins,
                environment,
                http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                    .max(1),
            },
            provider: ProviderConfig {
                api_key: var("POLLO_AI_API_KEY"),
                base_url: var("PROVIDER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                model_path: var("PROVIDER_MODEL_PATH")
                    .unwrap_or_else(|| DEFAULT_PROVIDER_MODEL_PATH.to_string())
                    .trim_matches('/')
                    .to_string(),
                resolution: var("PROVIDER_RESOLUTION")
                    .unwrap_or_else(|| DEFAULT_PROVIDER_RESOLUTION.to_string()),
                generate_audio,
                timeout_secs: var("PROVIDER_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            },
            storage: StorageConfig {
                endpoint: either("S3_ENDPOINT", "R2_ENDPOINT"),
                region: var("S3_REGION").unwrap_or_else(|| "auto".to_string()),
                bucket: either("S3_BUCKET", "R2_BUCKET_NAME"),
                access_key_id: either("S3_ACCESS_KEY_ID", "R2_ACCESS_KEY_ID"),
                secret_access_key: either("S3_SECRET_ACCESS_KEY", "R2_SECRET_ACCESS_KEY"),
                public_base_url: either("PUBLIC_BASE_URL", "R2_PUBLIC_BASE_URL"),
                staging_prefix: var("UPLOAD_STAGING_PREFIX")
                    .unwrap_or_else(|| DEFAULT_STAGING_PREFIX.to_string()),
            },
            session: SessionConfig {
                secret: var("SESSION_SECRET"),
                cookie_name: var("SESSION_COOKIE_NAME")
                    .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string()),
                max_age_secs: var("SESSION_MAX_AGE_SECS")
                    .and_then(|s| s.parse().ok())
                    .filter(|&secs: &i64| secs > 0)
                    .unwrap_or(DEFAULT_SESSION_MAX_AGE_SECS),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let staging = sanitize_path_segment(&self.storage.staging_prefix);
        if staging.is_empty() {
            return Err(anyhow::anyhow!(
                "UPLOAD_STAGING_PREFIX must contain at least one of [A-Za-z0-9_-]"
            ));
        }
        if PUBLISHED_PREFIXES.contains(&staging.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!(
                "UPLOAD_STAGING_PREFIX must not be a published-content namespace ({})",
                PUBLISHED_PREFIXES.join(", ")
            ));
        }

        if self.provider.timeout_secs == 0 || self.provider.timeout_secs > MAX_PROVIDER_TIMEOUT_SECS
        {
            return Err(anyhow::anyhow!(
                "PROVIDER_TIMEOUT_SECS must be between 1 and {}",
                MAX_PROVIDER_TIMEOUT_SECS
            ));
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PROVIDER_BASE_URL must be an http(s) URL"
            ));
        }

        match self.session.secret {
            Some(ref secret) if secret.len() < MIN_SESSION_SECRET_LEN => {
                return Err(anyhow::anyhow!(
                    "SESSION_SECRET must be at least {} characters long",
                    MIN_SESSION_SECRET_LEN
                ));
            }
            None if is_production_env(&self.base.environment) => {
                return Err(anyhow::anyhow!(
                    "SESSION_SECRET must be set in production"
                ));
            }
            _ => {}
        }

        Ok(())
    }
}
