//! Domain route groups (uploads, generations, session).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn upload_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/uploads/grant", API_PREFIX),
        post(handlers::uploads::issue_upload_grant),
    )
}

pub fn generation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/generations", API_PREFIX),
            post(handlers::generation::submit_generation),
        )
        .route(
            &format!("{}/generations/status", API_PREFIX),
            get(handlers::generation::get_generation_status),
        )
}

/// Session issuance sits outside the gate: it is how a caller gets through it.
pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/auth/session", API_PREFIX),
        post(handlers::session::create_session).delete(handlers::session::delete_session),
    )
}
