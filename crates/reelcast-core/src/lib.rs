//! Reelcast Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration, and
//! boundary validation shared by every Reelcast component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ProviderConfig, ServiceConfig, SessionConfig, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
