use crate::auth::SessionSettings;
use reelcast_core::Config;
use reelcast_provider::{JobStatusTranslator, JobSubmissionService};
use reelcast_storage::UploadGrantIssuer;
use std::sync::Arc;

/// Shared handler state. Every field is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: UploadGrantIssuer,
    pub submissions: JobSubmissionService,
    pub statuses: JobStatusTranslator,
    pub session: Arc<SessionSettings>,
}
