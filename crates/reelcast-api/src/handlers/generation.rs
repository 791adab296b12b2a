use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Extension, Json};
use reelcast_core::models::{
    JobStatusQuery, JobStatusResponse, SubmitJobRequest, SubmitJobResponse,
};
use std::sync::Arc;

/// Submit an image-to-video generation job
#[utoipa::path(
    post,
    path = "/api/v0/generations",
    tag = "generations",
    request_body = SubmitJobRequest,
    responses(
        (status = 200, description = "Job accepted by the provider", body = SubmitJobResponse),
        (status = 400, description = "Missing prompt or image", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 500, description = "Provider credential not configured", body = ErrorResponse),
        (status = 502, description = "Provider failed or unreachable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, session, request),
    fields(
        subject = %session.subject,
        image_count = request.images.as_ref().map(|i| i.len()).unwrap_or(0),
        operation = "submit_generation"
    )
)]
pub async fn submit_generation(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    ValidatedJson(request): ValidatedJson<SubmitJobRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let handle = state
        .submissions
        .submit(request.prompt.as_deref(), request.images.as_deref())
        .await?;

    Ok(Json(SubmitJobResponse::from(handle)))
}

/// Poll the current state of a generation job
#[utoipa::path(
    get,
    path = "/api/v0/generations/status",
    tag = "generations",
    params(JobStatusQuery),
    responses(
        (status = 200, description = "Current job state", body = JobStatusResponse),
        (status = 400, description = "Missing or invalid job id", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 500, description = "Provider credential not configured", body = ErrorResponse),
        (status = 502, description = "Provider failed or unreachable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, session, query),
    fields(
        subject = %session.subject,
        task_id = ?query.id,
        operation = "get_generation_status"
    )
)]
pub async fn get_generation_status(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    ValidatedQuery(query): ValidatedQuery<JobStatusQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let polled = state.statuses.poll(query.id.as_deref()).await?;

    Ok(Json(JobStatusResponse::new(polled.handle, polled.generations)))
}
