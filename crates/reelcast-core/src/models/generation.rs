use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// Client-facing state of a generation job.
///
/// Derived fresh from the provider on every status query and never advanced locally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalState {
    Submitted,
    Processing,
    Succeeded,
    Failed,
}

impl CanonicalState {
    /// Terminal states never change on later polls.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CanonicalState::Succeeded | CanonicalState::Failed)
    }
}

impl Display for CanonicalState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CanonicalState::Submitted => write!(f, "submitted"),
            CanonicalState::Processing => write!(f, "processing"),
            CanonicalState::Succeeded => write!(f, "succeeded"),
            CanonicalState::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for CanonicalState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(CanonicalState::Submitted),
            "processing" => Ok(CanonicalState::Processing),
            "succeeded" => Ok(CanonicalState::Succeeded),
            "failed" => Ok(CanonicalState::Failed),
            _ => Err(anyhow::anyhow!("Invalid canonical state: {}", s)),
        }
    }
}

/// One outstanding or completed generation request.
///
/// The handle is the whole state a client carries between calls; nothing is
/// persisted server-side. `result_reference` is only set when the job
/// succeeded and `error_detail` only when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: String,
    pub canonical_state: CanonicalState,
    pub result_reference: Option<String>,
    pub error_detail: Option<String>,
}

impl JobHandle {
    /// Handle returned right after a successful submission.
    pub fn submitted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            canonical_state: CanonicalState::Submitted,
            result_reference: None,
            error_detail: None,
        }
    }

    pub fn in_state(id: impl Into<String>, state: CanonicalState) -> Self {
        Self {
            id: id.into(),
            canonical_state: state,
            result_reference: None,
            error_detail: None,
        }
    }

    pub fn succeeded(id: impl Into<String>, result_reference: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            canonical_state: CanonicalState::Succeeded,
            result_reference: Some(result_reference.into()),
            error_detail: None,
        }
    }

    pub fn failed(id: impl Into<String>, error_detail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            canonical_state: CanonicalState::Failed,
            result_reference: None,
            error_detail: Some(error_detail.into()),
        }
    }
}

/// A single generation entry as reported by the provider, in its own vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderGeneration {
    /// Raw provider status string (e.g. `waiting`, `processing`, `succeed`, `failed`)
    #[serde(default)]
    pub status: String,
    /// Reference to the produced media, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Provider failure message, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_msg: Option<String>,
}

/// Latest provider view of a job: its id and its generation list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderJobStatus {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub generations: Vec<ProviderGeneration>,
}

/// Request to start a generation job
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobRequest {
    /// Source image references; only the first one is used
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// Text prompt describing the desired result
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Response after a job was accepted by the provider
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobResponse {
    /// Opaque provider job identifier used for polling
    pub task_id: String,
    pub state: CanonicalState,
}

impl From<JobHandle> for SubmitJobResponse {
    fn from(handle: JobHandle) -> Self {
        Self {
            task_id: handle.id,
            state: handle.canonical_state,
        }
    }
}

/// Query parameters for a status poll
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobStatusQuery {
    /// Job identifier returned by submission
    #[serde(default, alias = "taskId")]
    pub id: Option<String>,
}

/// Status of a generation job as exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub task_id: String,
    pub state: CanonicalState,
    /// Reference to the produced media, only when `state` is `succeeded`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    /// Diagnostic text, only when `state` is `failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Provider generation entries, passed through for clients that inspect them
    pub generations: Vec<ProviderGeneration>,
}

impl JobStatusResponse {
    pub fn new(handle: JobHandle, generations: Vec<ProviderGeneration>) -> Self {
        Self {
            task_id: handle.id,
            state: handle.canonical_state,
            result_url: handle.result_reference,
            error: handle.error_detail,
            generations,
        }
    }
}
