//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::models::candidate::{Candidate, RankedSet, ScoreResult};
use crate::models::email::EmailBundle;
use crate::screening::emails::build_emails;
use crate::screening::ranker::validate_candidate_count;
use crate::state::AppState;

/// Name used for uploads that arrive without a filename.
const FALLBACK_CANDIDATE_NAME: &str = "candidate";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TextScreeningRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub backend: String,
    pub results: Vec<ScoreResult>,
    pub emails: EmailBundle,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Multipart form: job description under `jd_text` or `job_description`,
/// resume files under `resumes` or `files` (1 to 10). The count is checked
/// before any document is parsed.
pub async fn handle_screen_uploads(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let mut job_description = String::new();
    let mut uploads: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "jd_text" | "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read jd_text: {e}")))?;
                if job_description.trim().is_empty() {
                    job_description = text;
                }
            }
            "resumes" | "files" => {
                let filename = field
                    .file_name()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(FALLBACK_CANDIDATE_NAME)
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read upload '{filename}': {e}"))
                })?;
                uploads.push((filename, data));
            }
            _ => {}
        }
    }

    let job_description = require_job_description(job_description)?;
    validate_candidate_count(uploads.len())?;

    let mut candidates = Vec::with_capacity(uploads.len());
    for (name, data) in uploads {
        let resume_text = extract_text(data, &name).await;
        candidates.push(Candidate { name, resume_text });
    }

    run_screening(&state, &job_description, &candidates)
        .await
        .map(Json)
}

/// POST /api/v1/screenings/text
///
/// Same as the upload endpoint for callers that already have resume text.
pub async fn handle_screen_text(
    State(state): State<AppState>,
    Json(request): Json<TextScreeningRequest>,
) -> Result<Json<ScreeningResponse>, AppError> {
    let job_description = require_job_description(request.job_description)?;
    validate_candidate_count(request.candidates.len())?;

    if request.candidates.iter().any(|c| c.name.trim().is_empty()) {
        return Err(AppError::InvalidInput(
            "Every candidate needs a non-empty name.".to_string(),
        ));
    }

    run_screening(&state, &job_description, &request.candidates)
        .await
        .map(Json)
}

/// POST /api/v1/emails
///
/// Template emails for an already ranked set.
pub async fn handle_build_emails(
    Json(ranked): Json<RankedSet>,
) -> Result<Json<EmailBundle>, AppError> {
    build_emails(&ranked).map(Json)
}

fn require_job_description(text: String) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Missing job description (jd_text).".to_string(),
        ));
    }
    Ok(text)
}

async fn run_screening(
    state: &AppState,
    job_description: &str,
    candidates: &[Candidate],
) -> Result<ScreeningResponse, AppError> {
    let run_id = Uuid::new_v4();
    info!(%run_id, candidates = candidates.len(), "Screening run started");

    let ranked = state.ranker.rank(job_description, candidates).await?;
    let emails = state.emails.compose(&ranked, job_description).await?;

    Ok(ScreeningResponse {
        run_id,
        generated_at: Utc::now(),
        backend: ranked.backend().to_string(),
        results: ranked.results().to_vec(),
        emails,
    })
}
