//! Data models for the application
//!
//! Request/response variants are explicit per operation and validated at the
//! HTTP boundary; domain values (`JobHandle`, `UploadGrant`) are ephemeral and
//! never persisted.

mod generation;
mod session;
mod upload;

pub use generation::*;
pub use session::*;
pub use upload::*;
