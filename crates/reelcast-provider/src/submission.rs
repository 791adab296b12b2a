//! Job Submission Service
//!
//! Validates a generation request and hands it to the provider. Returns a
//! handle in the `submitted` state; nothing is stored locally.

use reelcast_core::models::JobHandle;
use reelcast_core::validation::validate_submission;
use reelcast_core::AppError;
use std::sync::Arc;

use crate::provider::{GenerationProvider, ProviderGenerationRequest};

#[derive(Clone)]
pub struct JobSubmissionService {
    provider: Option<Arc<dyn GenerationProvider>>,
}

impl JobSubmissionService {
    pub fn new(provider: Option<Arc<dyn GenerationProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Submit one job.
    ///
    /// Every failure happens before the provider call or is reported from it;
    /// there is no retry, so one call to this method means at most one
    /// provider-side job.
    #[tracing::instrument(skip(self, prompt, images), fields(operation = "submit_generation"))]
    pub async fn submit(
        &self,
        prompt: Option<&str>,
        images: Option<&[String]>,
    ) -> Result<JobHandle, AppError> {
        let (prompt, images) = validate_submission(prompt, images)?;

        let provider = self.provider.as_ref().ok_or_else(|| {
            tracing::error!("POLLO_AI_API_KEY is missing");
            AppError::Configuration("Generation provider credential is not configured".to_string())
        })?;

        let request = ProviderGenerationRequest { images, prompt };
        let task_id = provider.create_generation(&request).await?;

        tracing::info!(
            task_id = %task_id,
            provider = provider.name(),
            "Generation job submitted"
        );

        Ok(JobHandle::submitted(task_id))
    }
}
