//! API constants
//!
//! Routes and the OpenAPI document are versioned under `API_PREFIX`.

/// Versioned prefix for every business route
pub const API_PREFIX: &str = "/api/v0";

/// Largest accepted request body. Bodies are small JSON documents.
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
