//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct ReadinessResponse {
    pub status: &'static str,
    pub provider: &'static str,
    pub storage: &'static str,
    pub session_gate: &'static str,
}

fn configured(flag: bool) -> &'static str {
    if flag {
        "configured"
    } else {
        "not_configured"
    }
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - reports which collaborators are configured.
///
/// Missing collaborators degrade the affected routes to configuration errors
/// but do not take the whole service out of rotation.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let provider_ready = state.submissions.is_configured() && state.statuses.is_configured();
    let storage_ready = state.uploads.is_configured();

    let response = ReadinessResponse {
        status: if provider_ready && storage_ready {
            "ready"
        } else {
            "degraded"
        },
        provider: configured(provider_ready),
        storage: configured(storage_ready),
        session_gate: if state.session.is_enforced() {
            "enforced"
        } else {
            "disabled"
        },
    };

    (StatusCode::OK, Json(response))
}
