//! Axum route handlers for the Job Description API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::job_description::{generate_job_description, JobDescriptionRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub job_description: String,
}

/// POST /api/v1/job-descriptions/generate
pub async fn handle_generate_jd(
    State(state): State<AppState>,
    Json(request): Json<JobDescriptionRequest>,
) -> Json<JobDescriptionResponse> {
    let job_description =
        generate_job_description(&request, state.writer.as_deref(), state.config.llm_timeout).await;
    Json(JobDescriptionResponse { job_description })
}

/// POST /api/v1/job-descriptions/upload
///
/// Accepts the document under `file` or `jd_file`; the first one wins.
pub async fn handle_upload_jd(
    mut multipart: Multipart,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        if !matches!(field.name(), Some("file" | "jd_file")) {
            continue;
        }
        let filename = field.file_name().unwrap_or("job_description").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {e}")))?;
        let job_description = extract_text(data, &filename).await;
        return Ok(Json(JobDescriptionResponse { job_description }));
    }

    Err(AppError::InvalidInput(
        "Provide a JD file under field 'file' or 'jd_file'.".to_string(),
    ))
}
