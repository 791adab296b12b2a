//! Provider status vocabulary.
//!
//! The one place that knows which provider words mean what. Lookups are
//! case-insensitive; unknown words are treated as non-terminal.

use reelcast_core::models::CanonicalState;

/// Known provider statuses and the state each one maps to.
pub const STATUS_VOCABULARY: &[(&str, CanonicalState)] = &[
    ("waiting", CanonicalState::Submitted),
    ("queued", CanonicalState::Submitted),
    ("pending", CanonicalState::Submitted),
    ("starting", CanonicalState::Processing),
    ("processing", CanonicalState::Processing),
    ("running", CanonicalState::Processing),
    ("generating", CanonicalState::Processing),
    ("succeed", CanonicalState::Succeeded),
    ("succeeded", CanonicalState::Succeeded),
    ("success", CanonicalState::Succeeded),
    ("completed", CanonicalState::Succeeded),
    ("failed", CanonicalState::Failed),
    ("failure", CanonicalState::Failed),
    ("error", CanonicalState::Failed),
    ("canceled", CanonicalState::Failed),
    ("cancelled", CanonicalState::Failed),
    ("timeout", CanonicalState::Failed),
];

/// Look up a provider status. `None` means the word is not in the table.
pub fn lookup_status(provider_status: &str) -> Option<CanonicalState> {
    let normalized = provider_status.trim().to_ascii_lowercase();
    STATUS_VOCABULARY
        .iter()
        .find(|(word, _)| *word == normalized)
        .map(|(_, state)| *state)
}

/// Map a provider status to a canonical state.
///
/// Unknown words become `Processing` so a new provider status can never end a
/// job early.
pub fn map_provider_status(provider_status: &str) -> CanonicalState {
    lookup_status(provider_status).unwrap_or_else(|| {
        tracing::warn!(
            provider_status = %provider_status,
            "Unrecognized provider status, treating as processing"
        );
        CanonicalState::Processing
    })
}
