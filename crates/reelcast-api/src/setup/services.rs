//! Service wiring: backends from configuration, then handler state.

use crate::auth::SessionSettings;
use crate::state::AppState;
use anyhow::{Context, Result};
use reelcast_core::Config;
#[cfg(feature = "provider-pollo")]
use reelcast_provider::PolloProvider;
use reelcast_provider::{GenerationProvider, JobStatusTranslator, JobSubmissionService};
use reelcast_storage::{create_storage, Storage, UploadGrantIssuer};
use std::sync::Arc;

/// Build backends from configuration and assemble the application state.
pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = create_storage(config.storage()).context("Failed to initialize storage")?;
    let provider = setup_provider(config)?;
    Ok(build_state(config, storage, provider))
}

#[cfg(feature = "provider-pollo")]
fn setup_provider(config: &Config) -> Result<Option<Arc<dyn GenerationProvider>>> {
    let provider = PolloProvider::from_config(config.provider())?;
    match provider {
        Some(provider) => {
            tracing::info!(
                base_url = %config.provider().base_url,
                model_path = %config.provider().model_path,
                timeout_secs = config.provider().timeout_secs,
                "Generation provider initialized"
            );
            Ok(Some(Arc::new(provider)))
        }
        None => {
            tracing::warn!("POLLO_AI_API_KEY not set - generation endpoints will answer 500");
            Ok(None)
        }
    }
}

#[cfg(not(feature = "provider-pollo"))]
fn setup_provider(_config: &Config) -> Result<Option<Arc<dyn GenerationProvider>>> {
    tracing::warn!("No generation provider compiled in (provider-pollo feature not enabled)");
    Ok(None)
}

/// Assemble handler state from already-built backends.
///
/// Either backend may be absent; the affected operations then answer with a
/// configuration error.
pub fn build_state(
    config: &Config,
    storage: Option<Arc<dyn Storage>>,
    provider: Option<Arc<dyn GenerationProvider>>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config: config.clone(),
        uploads: UploadGrantIssuer::new(storage, config.storage().staging_prefix.clone()),
        submissions: JobSubmissionService::new(provider.clone()),
        statuses: JobStatusTranslator::new(provider),
        session: Arc::new(SessionSettings::from_config(config)),
    })
}
