use crate::auth::session::is_cookie_safe;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    Json,
};
use reelcast_core::models::{SessionRequest, SessionResponse};
use reelcast_core::AppError;
use std::sync::Arc;

/// Establish a browser session from a signed token
#[utoipa::path(
    post,
    path = "/api/v0/auth/session",
    tag = "auth",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session cookies set", body = SessionResponse),
        (status = 400, description = "Missing token or invalid username", body = ErrorResponse),
        (status = 401, description = "Token rejected", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create_session"))]
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SessionRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let token = request
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Token is required".to_string()))?;

    let session = &state.session;
    let claimed_username = if session.is_enforced() {
        let claims = session.verify(token)?;
        tracing::info!(subject = %claims.sub, "Session established");
        claims.username
    } else {
        tracing::warn!("SESSION_SECRET not configured; storing session token unverified");
        None
    };

    if !is_cookie_safe(token) {
        return Err(AppError::InvalidInput("Invalid token".to_string()).into());
    }

    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .or(claimed_username);
    if let Some(ref username) = username {
        if !is_cookie_safe(username) {
            return Err(AppError::InvalidInput("Invalid username".to_string()).into());
        }
    }

    let mut cookies = vec![(SET_COOKIE, session.session_cookie(token))];
    if let Some(username) = username {
        cookies.push((SET_COOKIE, session.username_cookie(&username)));
    }

    Ok((
        AppendHeaders(cookies),
        Json(SessionResponse { success: true }),
    ))
}

/// End the browser session
#[utoipa::path(
    delete,
    path = "/api/v0/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookies cleared", body = SessionResponse)
    )
)]
pub async fn delete_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookies = state
        .session
        .cleared_cookies()
        .map(|cookie| (SET_COOKIE, cookie));

    (
        AppendHeaders(cookies),
        Json(SessionResponse { success: true }),
    )
}
