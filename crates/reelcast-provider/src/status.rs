//! Job Status Translator
//!
//! Turns the provider's latest answer into a canonical state. No state is
//! cached between polls, so concurrent polls for the same job need no locking.

use reelcast_core::models::{CanonicalState, JobHandle, ProviderGeneration, ProviderJobStatus};
use reelcast_core::validation::validate_job_id;
use reelcast_core::AppError;
use std::sync::Arc;

use crate::provider::{GenerationProvider, ProviderError};
use crate::vocabulary::map_provider_status;

pub const MISSING_RESULT_DETAIL: &str = "Provider reported success without a result URL";
pub const DEFAULT_FAILURE_DETAIL: &str = "Generation failed";
pub const UNUSABLE_STATUS_DETAIL: &str = "Provider returned an unusable status payload";

/// Result of one poll: the canonical handle plus the raw provider entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedStatus {
    pub handle: JobHandle,
    pub generations: Vec<ProviderGeneration>,
}

/// Derive a handle from a provider payload.
///
/// Only the first generation entry counts. A success without a usable URL is a
/// failure, never a success with a missing result.
pub fn translate(job_id: &str, status: &ProviderJobStatus) -> JobHandle {
    let Some(generation) = status.generations.first() else {
        return JobHandle::in_state(job_id, CanonicalState::Processing);
    };

    match map_provider_status(&generation.status) {
        CanonicalState::Succeeded => match non_empty(generation.url.as_deref()) {
            Some(url) => JobHandle::succeeded(job_id, url),
            None => JobHandle::failed(job_id, MISSING_RESULT_DETAIL),
        },
        CanonicalState::Failed => JobHandle::failed(
            job_id,
            non_empty(generation.fail_msg.as_deref()).unwrap_or(DEFAULT_FAILURE_DETAIL),
        ),
        state => JobHandle::in_state(job_id, state),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct JobStatusTranslator {
    provider: Option<Arc<dyn GenerationProvider>>,
}

impl JobStatusTranslator {
    pub fn new(provider: Option<Arc<dyn GenerationProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Query the provider once and translate its answer.
    ///
    /// A payload that cannot be interpreted fails the job, not the request;
    /// transport and HTTP errors still fail the request.
    #[tracing::instrument(skip(self), fields(operation = "poll_generation"))]
    pub async fn poll(&self, job_id: Option<&str>) -> Result<TranslatedStatus, AppError> {
        let job_id = validate_job_id(job_id)?;

        let provider = self.provider.as_ref().ok_or_else(|| {
            tracing::error!("POLLO_AI_API_KEY is missing");
            AppError::Configuration("Generation provider credential is not configured".to_string())
        })?;

        let status = match provider.fetch_status(&job_id).await {
            Ok(status) => status,
            Err(ProviderError::Contract(detail)) => {
                tracing::warn!(
                    task_id = %job_id,
                    detail = %detail,
                    "Unusable provider status payload, reporting job as failed"
                );
                return Ok(TranslatedStatus {
                    handle: JobHandle::failed(job_id, UNUSABLE_STATUS_DETAIL),
                    generations: Vec::new(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let handle = translate(&job_id, &status);

        tracing::debug!(
            task_id = %job_id,
            state = %handle.canonical_state,
            "Generation status translated"
        );

        Ok(TranslatedStatus {
            handle,
            generations: status.generations,
        })
    }
}
