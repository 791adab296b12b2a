use crate::auth::models::SessionContext;
use crate::auth::session::SessionSettings;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use reelcast_core::AppError;
use std::sync::Arc;

/// Session gate for protected routes.
///
/// Admits a request only with a valid session cookie and stores the caller in
/// request extensions as a [`SessionContext`]. When no session secret is
/// configured every request is admitted as anonymous.
pub async fn session_gate_middleware(
    State(session): State<Arc<SessionSettings>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !session.is_enforced() {
        request.extensions_mut().insert(SessionContext::anonymous());
        return next.run(request).await;
    }

    let Some(token) = session.token_from_headers(request.headers()) else {
        tracing::debug!(path = %request.uri().path(), "Missing session cookie");
        return HttpAppError(AppError::Unauthorized(
            "Missing session cookie".to_string(),
        ))
        .into_response();
    };

    match session.verify(token) {
        Ok(claims) => {
            let context = SessionContext::from(claims);
            tracing::debug!(subject = %context.subject, "Session verified");
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => HttpAppError(e).into_response(),
    }
}
