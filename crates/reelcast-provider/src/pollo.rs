//! Pollo.ai provider for image-to-video generation
//!
//! Talks to the Pollo.ai platform API (Google Veo 3.1 model by default).
//! Jobs are created with one POST and observed with GET status calls; the
//! provider never pushes completion.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reelcast_core::models::ProviderJobStatus;
use reelcast_core::ProviderConfig;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::{Duration, Instant};

use crate::provider::{
    GenerationProvider, ProviderError, ProviderGenerationRequest, ProviderResult,
};

const API_KEY_HEADER: &str = "x-api-key";

/// Pollo.ai API client
pub struct PolloProvider {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model_path: String,
    resolution: String,
    generate_audio: bool,
}

impl Debug for PolloProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PolloProvider")
            .field("base_url", &self.base_url)
            .field("model_path", &self.model_path)
            .finish()
    }
}

// Pollo API structures
#[derive(Debug, Serialize)]
struct CreateGenerationRequest<'a> {
    input: GenerationInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationInput<'a> {
    images: &'a [String],
    prompt: &'a str,
    resolution: &'a str,
    generate_audio: bool,
}

impl PolloProvider {
    pub fn new(api_key: impl Into<String>, config: &ProviderConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for Pollo.ai")?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_path: config.model_path.trim_matches('/').to_string(),
            resolution: config.resolution.clone(),
            generate_audio: config.generate_audio,
        })
    }

    /// Build a provider when a credential is configured, `None` otherwise.
    pub fn from_config(config: &ProviderConfig) -> Result<Option<Self>> {
        config
            .api_key
            .as_deref()
            .map(|key| Self::new(key, config))
            .transpose()
    }

    fn submit_url(&self) -> String {
        format!("{}/{}", self.base_url, self.model_path)
    }

    fn status_url(&self, job_id: &str) -> String {
        format!("{}/generation/{}/status", self.base_url, job_id)
    }

    /// Read a response body, turning non-2xx answers into `ProviderError::Http`.
    async fn read_json(response: reqwest::Response) -> ProviderResult<Value> {
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Contract(format!("Response is not valid JSON: {}", e)))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(err.to_string())
    } else if err.is_decode() {
        ProviderError::Contract(err.to_string())
    } else {
        ProviderError::Transport(err.to_string())
    }
}

/// Payloads arrive either bare or wrapped in a `data` object.
fn unwrap_envelope(value: &Value) -> &Value {
    let is_bare = value.get("taskId").is_some() || value.get("generations").is_some();
    match value.get("data") {
        Some(data) if !is_bare && data.is_object() => data,
        _ => value,
    }
}

fn extract_task_id(value: &Value) -> ProviderResult<String> {
    unwrap_envelope(value)
        .get("taskId")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::Contract("Response has no taskId".to_string()))
}

fn parse_job_status(value: &Value) -> ProviderResult<ProviderJobStatus> {
    let payload = unwrap_envelope(value);
    if !payload.is_object() {
        return Err(ProviderError::Contract(
            "Status response is not a JSON object".to_string(),
        ));
    }
    // An empty list means "not started yet"; a missing list means no job data at all.
    if !payload.get("generations").is_some_and(Value::is_array) {
        return Err(ProviderError::Contract(
            "Status response has no generations list".to_string(),
        ));
    }
    serde_json::from_value(payload.clone())
        .map_err(|e| ProviderError::Contract(format!("Unexpected status payload: {}", e)))
}

#[async_trait]
impl GenerationProvider for PolloProvider {
    async fn create_generation(
        &self,
        request: &ProviderGenerationRequest,
    ) -> ProviderResult<String> {
        let start = Instant::now();
        let body = CreateGenerationRequest {
            input: GenerationInput {
                images: &request.images,
                prompt: &request.prompt,
                resolution: &self.resolution,
                generate_audio: self.generate_audio,
            },
        };

        let response = self
            .http_client
            .post(self.submit_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send Pollo.ai generation request");
                map_reqwest_error(e)
            })?;

        let status = response.status();
        let value = Self::read_json(response).await.map_err(|e| {
            tracing::error!(
                status = status.as_u16(),
                error = %e,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Pollo.ai generation request failed"
            );
            e
        })?;
        let task_id = extract_task_id(&value)?;

        tracing::info!(
            task_id = %task_id,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Pollo.ai generation created"
        );

        Ok(task_id)
    }

    async fn fetch_status(&self, job_id: &str) -> ProviderResult<ProviderJobStatus> {
        let start = Instant::now();

        let response = self
            .http_client
            .get(self.status_url(job_id))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(task_id = %job_id, error = %e, "Failed to query Pollo.ai status");
                map_reqwest_error(e)
            })?;

        let status = response.status();
        let value = Self::read_json(response).await.map_err(|e| {
            tracing::warn!(
                task_id = %job_id,
                status = status.as_u16(),
                error = %e,
                "Pollo.ai status request failed"
            );
            e
        })?;
        let job_status = parse_job_status(&value)?;

        tracing::debug!(
            task_id = %job_id,
            status = status.as_u16(),
            generations = job_status.generations.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Pollo.ai status fetched"
        );

        Ok(job_status)
    }

    fn name(&self) -> &'static str {
        "pollo"
    }
}
