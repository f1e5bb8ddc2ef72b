use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Candidate count outside 1..=10, missing job description, malformed request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing to build emails from.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Optional collaborator (LLM scorer, generative-text service) failed.
    /// Callers on the ranking and email paths recover from this locally.
    #[error("External service unavailable: {0}")]
    ExternalServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidInput(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_INPUT",
                msg.clone(),
            ),
            AppError::EmptyInput(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_INPUT",
                msg.clone(),
            ),
            AppError::ExternalServiceUnavailable(msg) => {
                tracing::error!("External service error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "EXTERNAL_SERVICE_UNAVAILABLE",
                    "An upstream AI service is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_422() {
        let response = AppError::InvalidInput("too many resumes".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_empty_input_maps_to_422() {
        let response = AppError::EmptyInput("no candidates".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_external_service_maps_to_503() {
        let response =
            AppError::ExternalServiceUnavailable("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
