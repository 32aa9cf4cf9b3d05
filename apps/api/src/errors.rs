#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure is flattened into the `{"success": false, "error": ...}`
/// envelope; nothing is allowed to escape as a bare 500 with no body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream API key is not configured")]
    ApiKeyNotConfigured,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ApiKeyNotConfigured => {
                // Misconfiguration, not an upstream fault: answer 400 with
                // remediation steps instead of proxying a failure.
                let body = Json(json!({
                    "success": false,
                    "error": "Upstream API key is not configured",
                    "message": "Set DEEPSEEK_API_KEY in the environment (or a .env file) and restart the service",
                    "configGuide": {
                        "step1": "Create an API key at https://platform.deepseek.com/",
                        "step2": "Add DEEPSEEK_API_KEY=<your key> to the environment",
                        "step3": "Restart the service",
                    },
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("personalInfo cannot be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_api_key_maps_to_400() {
        let response = AppError::ApiKeyNotConfigured.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_llm_errors_map_to_500() {
        let response = AppError::Llm(LlmError::RateLimited).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
