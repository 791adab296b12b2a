//! Error types module
//!
//! This module provides the core error types used throughout Reelcast.
//! All failures are unified under the `AppError` enum, which covers caller
//! validation, server configuration, and the ways the generation provider or
//! the storage signer can fail.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for upstream issues outside our control
    Warn,
    /// Error level - for misconfiguration and unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "CONFIGURATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller input is malformed or missing.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A required server-side credential or setting is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The generation provider answered with a non-success status.
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Network failure or timeout talking to the provider or the storage signer.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider answered at the transport level with a payload we cannot use.
    #[error("Upstream contract violation: {0}")]
    UpstreamContract(String),

    /// Credential signing for object storage failed.
    #[error("Upstream configuration error: {0}")]
    UpstreamConfiguration(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Status used for upstream failures that are not attributable to the caller.
const BAD_GATEWAY: u16 = 502;

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// `Upstream` is resolved separately because its status depends on the provider's answer.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Sign in again to obtain a fresh session"),
            false,
            LogLevel::Debug,
        ),
        AppError::Configuration(_) => (
            500,
            "CONFIGURATION_ERROR",
            false,
            Some("Contact the service operator"),
            true,
            LogLevel::Error,
        ),
        AppError::Upstream { status, .. } => (
            upstream_status(*status),
            "UPSTREAM_ERROR",
            !(400..500).contains(status),
            Some("Check the request or retry later"),
            false,
            LogLevel::Warn,
        ),
        AppError::UpstreamUnavailable(_) => (
            BAD_GATEWAY,
            "UPSTREAM_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Warn,
        ),
        AppError::UpstreamContract(_) => (
            BAD_GATEWAY,
            "UPSTREAM_CONTRACT_ERROR",
            false,
            Some("Submit the job again"),
            true,
            LogLevel::Error,
        ),
        AppError::UpstreamConfiguration(_) => (
            500,
            "UPLOAD_SIGNING_ERROR",
            false,
            Some("Contact the service operator"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

/// Client-attributable provider statuses pass through; everything else becomes 502.
fn upstream_status(status: u16) -> u16 {
    if (400..500).contains(&status) {
        status
    } else {
        BAD_GATEWAY
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "ValidationError",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Configuration(_) => "ConfigurationError",
            AppError::Upstream { .. } => "UpstreamError",
            AppError::UpstreamUnavailable(_) => "UpstreamUnavailableError",
            AppError::UpstreamContract(_) => "UpstreamContractError",
            AppError::UpstreamConfiguration(_) => "UpstreamConfigurationError",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Unauthorized(_) => "Unauthorized".to_string(),
            AppError::Configuration(_) => "Server configuration error".to_string(),
            AppError::Upstream { ref message, .. } => {
                format!("Generation provider error: {}", message)
            }
            AppError::UpstreamUnavailable(_) => "Generation provider unavailable".to_string(),
            AppError::UpstreamContract(_) => {
                "Generation provider returned an unusable response".to_string()
            }
            AppError::UpstreamConfiguration(_) => "Failed to generate upload URL".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
