//! Reelcast Provider Library
//!
//! External generation provider integration: the `GenerationProvider` trait,
//! the Pollo.ai client, the provider status vocabulary, and the two services
//! built on them (job submission and status translation).

#[cfg(feature = "provider-pollo")]
pub mod pollo;
pub mod provider;
pub mod status;
pub mod submission;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
#[cfg(feature = "provider-pollo")]
pub use pollo::PolloProvider;
pub use provider::{
    summarize_error_body, GenerationProvider, ProviderError, ProviderGenerationRequest,
    ProviderResult,
};
pub use status::{translate, JobStatusTranslator, TranslatedStatus};
pub use submission::JobSubmissionService;
pub use vocabulary::map_provider_status;
