//! Generation provider abstraction
//!
//! Keeps the provider's wire protocol out of the submission and status logic.
//! Implementations own transport, authentication and payload decoding; the
//! services above them own validation and state translation.

use async_trait::async_trait;
use reelcast_core::models::ProviderJobStatus;
use reelcast_core::AppError;
use std::fmt::Debug;
use thiserror::Error;

/// Longest provider error text that is forwarded to clients.
pub const MAX_ERROR_SUMMARY_CHARS: usize = 200;

/// Input accepted by a provider for one generation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderGenerationRequest {
    pub images: Vec<String>,
    pub prompt: String,
}

/// Errors raised while talking to a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("Provider returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The request did not complete in time.
    #[error("Provider request timed out: {0}")]
    Timeout(String),

    /// The provider could not be reached.
    #[error("Provider transport error: {0}")]
    Transport(String),

    /// A success response did not match the expected shape.
    #[error("Provider contract violation: {0}")]
    Contract(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            // The server's own credential was refused; not something the caller can fix.
            ProviderError::Http {
                status: status @ (401 | 403),
                body,
            } => AppError::Configuration(format!(
                "Generation provider rejected the credential ({}): {}",
                status,
                summarize_error_body(&body)
            )),
            ProviderError::Http { status, body } => AppError::Upstream {
                status,
                message: summarize_error_body(&body),
            },
            ProviderError::Timeout(msg) | ProviderError::Transport(msg) => {
                AppError::UpstreamUnavailable(msg)
            }
            ProviderError::Contract(msg) => AppError::UpstreamContract(msg),
        }
    }
}

/// Reduce a provider error body to something safe to show a client.
///
/// Prefers a JSON `message` or `error` field; falls back to the raw text cut
/// to [`MAX_ERROR_SUMMARY_CHARS`].
pub fn summarize_error_body(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"].iter().find_map(|field| match value.get(*field) {
                Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                    Some(s.trim().to_string())
                }
                Some(serde_json::Value::Object(inner)) => inner
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(|m| m.trim().to_string()),
                _ => None,
            })
        });

    let text = from_json.unwrap_or_else(|| body.trim().to_string());
    if text.is_empty() {
        return "empty response body".to_string();
    }
    if text.chars().count() > MAX_ERROR_SUMMARY_CHARS {
        let truncated: String = text.chars().take(MAX_ERROR_SUMMARY_CHARS).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}

/// External asynchronous media-generation provider
#[async_trait]
pub trait GenerationProvider: Send + Sync + Debug {
    /// Start a job and return the provider's opaque job id.
    async fn create_generation(&self, request: &ProviderGenerationRequest)
        -> ProviderResult<String>;

    /// Fetch the provider's current view of a job.
    async fn fetch_status(&self, job_id: &str) -> ProviderResult<ProviderJobStatus>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prefers_json_message() {
        assert_eq!(
            summarize_error_body(r#"{"message":"Invalid image URL","code":"BAD_INPUT"}"#),
            "Invalid image URL"
        );
        assert_eq!(
            summarize_error_body(r#"{"error":{"message":"quota exceeded"}}"#),
            "quota exceeded"
        );
    }

    #[test]
    fn test_summary_truncates_plain_text() {
        let body = "x".repeat(500);
        let summary = summarize_error_body(&body);
        assert_eq!(summary.chars().count(), MAX_ERROR_SUMMARY_CHARS + 3);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_http_error_keeps_status() {
        let err: AppError = ProviderError::Http {
            status: 422,
            body: r#"{"message":"Invalid image URL"}"#.to_string(),
        }
        .into();
        assert!(matches!(
            err,
            AppError::Upstream { status: 422, ref message } if message == "Invalid image URL"
        ));
    }

    #[test]
    fn test_rejected_credential_is_configuration_error() {
        for status in [401, 403] {
            let err: AppError = ProviderError::Http {
                status,
                body: r#"{"message":"Invalid API key"}"#.to_string(),
            }
            .into();
            assert!(matches!(err, AppError::Configuration(_)), "status {}", status);
        }
    }

    #[test]
    fn test_timeout_and_transport_are_unavailable() {
        let timeout: AppError = ProviderError::Timeout("30s".to_string()).into();
        let transport: AppError = ProviderError::Transport("refused".to_string()).into();
        assert!(matches!(timeout, AppError::UpstreamUnavailable(_)));
        assert!(matches!(transport, AppError::UpstreamUnavailable(_)));
    }
}
