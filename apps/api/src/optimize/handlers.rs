//! Axum route handlers for the Optimization API.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::optimize::optimizer::{optimize_resume, OptimizationResult, OptimizeRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub success: bool,
    pub data: OptimizationResult,
}

#[derive(Debug, Serialize)]
pub struct LlmHealthResponse {
    pub configured: bool,
    pub valid: bool,
}

/// POST /api/v1/optimize-resume
///
/// Validates the input, refuses to run without a usable upstream credential,
/// then delegates to the optimizer and wraps the result in the success
/// envelope. An optimization failure is non-blocking for the caller: the
/// error envelope tells the user whether retrying makes sense.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    if request.personal_info.trim().is_empty() {
        return Err(AppError::Validation(
            "personalInfo cannot be empty".to_string(),
        ));
    }

    if !state.llm.is_configured() {
        return Err(AppError::ApiKeyNotConfigured);
    }

    let data = optimize_resume(&state.llm, &request).await?;

    Ok(Json(OptimizeResponse {
        success: true,
        data,
    }))
}

/// GET /api/v1/optimize-resume
///
/// Static service description for collaborators probing the endpoint.
pub async fn handle_service_info() -> Json<Value> {
    Json(json!({
        "message": "Resume optimization service is running",
        "endpoints": {
            "POST /api/v1/optimize-resume": "Optimize resume content",
            "POST /api/v1/personal-info/parse": "Parse a free-text personal-info block",
        },
    }))
}

/// GET /api/v1/optimize-resume/health
///
/// Reports whether an upstream credential is configured and whether the
/// provider currently accepts it.
pub async fn handle_llm_health(State(state): State<AppState>) -> Json<LlmHealthResponse> {
    let configured = state.llm.is_configured();
    let valid = configured && state.llm.validate_api_key().await;

    Json(LlmHealthResponse { configured, valid })
}
