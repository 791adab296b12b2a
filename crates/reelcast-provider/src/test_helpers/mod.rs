//! Test helpers for service unit tests
//!
//! A scripted in-memory provider that counts calls, so tests can assert that
//! rejected input never produced outbound traffic.

use async_trait::async_trait;
use reelcast_core::models::{ProviderGeneration, ProviderJobStatus};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::provider::{
    GenerationProvider, ProviderError, ProviderGenerationRequest, ProviderResult,
};

#[derive(Debug, Default)]
pub struct FakeProvider {
    /// Task id handed out on submission; `None` makes submission fail with HTTP 500.
    pub task_id: Option<String>,
    /// Status answers in order; the last one repeats.
    pub statuses: Mutex<VecDeque<ProviderJobStatus>>,
    pub last_request: Mutex<Option<ProviderGenerationRequest>>,
    pub create_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn accepting(task_id: &str) -> Self {
        Self {
            task_id: Some(task_id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<ProviderJobStatus>) -> Self {
        self.statuses = Mutex::new(statuses.into());
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

/// Provider payload with a single generation entry.
pub fn single_generation(
    task_id: &str,
    status: &str,
    url: Option<&str>,
    fail_msg: Option<&str>,
) -> ProviderJobStatus {
    ProviderJobStatus {
        task_id: Some(task_id.to_string()),
        generations: vec![ProviderGeneration {
            status: status.to_string(),
            url: url.map(str::to_string),
            fail_msg: fail_msg.map(str::to_string),
        }],
    }
}

#[async_trait]
impl GenerationProvider for FakeProvider {
    async fn create_generation(
        &self,
        request: &ProviderGenerationRequest,
    ) -> ProviderResult<String> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.task_id.clone().ok_or_else(|| ProviderError::Http {
            status: 500,
            body: "internal".to_string(),
        })
    }

    async fn fetch_status(&self, _job_id: &str) -> ProviderResult<ProviderJobStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        let next = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        next.ok_or_else(|| ProviderError::Contract("no scripted status".to_string()))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
