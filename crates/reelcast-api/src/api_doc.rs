//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use reelcast_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reelcast API",
        version = "0.1.0",
        description = "Image-to-video generation API (v0). Clients obtain a presigned upload URL, upload the source image directly to storage, submit a generation job and poll it until it succeeds or fails. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Uploads
        handlers::uploads::issue_upload_grant,
        // Generations
        handlers::generation::submit_generation,
        handlers::generation::get_generation_status,
        // Session
        handlers::session::create_session,
        handlers::session::delete_session,
    ),
    components(schemas(
        error::ErrorResponse,
        models::UploadGrantRequest,
        models::UploadGrant,
        models::SubmitJobRequest,
        models::SubmitJobResponse,
        models::JobStatusResponse,
        models::ProviderGeneration,
        models::CanonicalState,
        models::SessionRequest,
        models::SessionResponse,
    )),
    tags(
        (name = "uploads", description = "Presigned direct uploads into staging storage"),
        (name = "generations", description = "Generation job submission and status"),
        (name = "auth", description = "Browser session cookies")
    )
)]
pub struct ApiDoc;
