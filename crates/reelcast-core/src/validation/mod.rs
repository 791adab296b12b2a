//! Boundary validation for caller input.
//!
//! Every check here runs before any outbound call, so a rejected request never
//! reaches the provider or the storage signer.

use crate::constants::MAX_IMAGES_PER_JOB;
use crate::error::AppError;

pub const MAX_CONTENT_TYPE_LENGTH: usize = 255;
pub const MAX_PROMPT_LENGTH: usize = 4000;
pub const MAX_JOB_ID_LENGTH: usize = 128;
pub const MAX_IMAGE_REFERENCE_LENGTH: usize = 2048;

/// Validate the MIME type of an upload grant request and return it trimmed.
pub fn validate_content_type(content_type: Option<&str>) -> Result<String, AppError> {
    let content_type = content_type.map(str::trim).unwrap_or_default();
    if content_type.is_empty() {
        return Err(AppError::InvalidInput("Missing contentType".to_string()));
    }
    if content_type.len() > MAX_CONTENT_TYPE_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "contentType must be at most {} characters",
            MAX_CONTENT_TYPE_LENGTH
        )));
    }
    let well_formed = content_type
        .split_once('/')
        .map(|(kind, subtype)| !kind.is_empty() && !subtype.is_empty())
        .unwrap_or(false);
    if !well_formed || content_type.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid contentType: {}",
            content_type
        )));
    }
    Ok(content_type.to_string())
}

/// Validate a submission and return the normalized `(prompt, images)` pair.
///
/// The provider accepts exactly one reference per job, so the list is cut down
/// to its first element.
pub fn validate_submission(
    prompt: Option<&str>,
    images: Option<&[String]>,
) -> Result<(String, Vec<String>), AppError> {
    let prompt = prompt.map(str::trim).unwrap_or_default();
    let first_image = images
        .and_then(|images| images.first())
        .map(|image| image.trim())
        .unwrap_or_default();

    if prompt.is_empty() || first_image.is_empty() {
        return Err(AppError::InvalidInput(
            "Image URL and prompt are required".to_string(),
        ));
    }
    if prompt.chars().count() > MAX_PROMPT_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "prompt must be at most {} characters",
            MAX_PROMPT_LENGTH
        )));
    }
    validate_image_reference(first_image)?;

    let selected: Vec<String> = std::iter::once(first_image.to_string())
        .take(MAX_IMAGES_PER_JOB)
        .collect();
    Ok((prompt.to_string(), selected))
}

/// Image references must be absolute http(s) URLs the provider can fetch.
pub fn validate_image_reference(reference: &str) -> Result<(), AppError> {
    if reference.len() > MAX_IMAGE_REFERENCE_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Image URL must be at most {} characters",
            MAX_IMAGE_REFERENCE_LENGTH
        )));
    }
    let host = reference
        .strip_prefix("https://")
        .or_else(|| reference.strip_prefix("http://"))
        .map(|rest| rest.split(['/', '?', '#']).next().unwrap_or_default());
    match host {
        Some(host) if !host.is_empty() && !reference.chars().any(char::is_whitespace) => Ok(()),
        _ => Err(AppError::InvalidInput(format!(
            "Image URL must be an absolute http(s) URL: {}",
            reference
        ))),
    }
}

/// Validate a job id before it is interpolated into a provider URL.
pub fn validate_job_id(id: Option<&str>) -> Result<String, AppError> {
    let id = id.map(str::trim).unwrap_or_default();
    if id.is_empty() {
        return Err(AppError::InvalidInput("taskId is required".to_string()));
    }
    if id.len() > MAX_JOB_ID_LENGTH
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidInput("Invalid taskId".to_string()));
    }
    Ok(id.to_string())
}

/// Strip everything but `[A-Za-z0-9_-]` from a single storage path segment.
pub fn sanitize_path_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
