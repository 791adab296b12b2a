use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Extension, Json};
use reelcast_core::models::{UploadGrant, UploadGrantRequest};
use std::sync::Arc;

/// Issue a presigned URL for one direct upload into staging storage
#[utoipa::path(
    post,
    path = "/api/v0/uploads/grant",
    tag = "uploads",
    request_body = UploadGrantRequest,
    responses(
        (status = 200, description = "Upload grant issued", body = UploadGrant),
        (status = 400, description = "Missing or invalid contentType", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 500, description = "Storage not configured or signing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, session, request),
    fields(
        subject = %session.subject,
        content_type = ?request.content_type,
        operation = "issue_upload_grant"
    )
)]
pub async fn issue_upload_grant(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    ValidatedJson(request): ValidatedJson<UploadGrantRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let grant = state
        .uploads
        .issue_grant(request.content_type.as_deref(), request.folder.as_deref())
        .await?;

    Ok(Json(grant))
}
