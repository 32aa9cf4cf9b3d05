//! Axum route handler for the personal-info parse preview.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::personal_info::classifier::{classify_personal_info, ParsedPersonalInfo};

#[derive(Debug, Deserialize)]
pub struct ParsePersonalInfoRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParsePersonalInfoResponse {
    pub success: bool,
    pub data: ParsedPersonalInfo,
}

/// POST /api/v1/personal-info/parse
///
/// Runs the line classifier and returns the structured record. Useful for
/// previewing how a contact block will be split before optimizing.
pub async fn handle_parse_personal_info(
    Json(request): Json<ParsePersonalInfoRequest>,
) -> Result<Json<ParsePersonalInfoResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    Ok(Json(ParsePersonalInfoResponse {
        success: true,
        data: classify_personal_info(&request.text),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_returns_success_envelope() {
        let response = handle_parse_personal_info(Json(ParsePersonalInfoRequest {
            text: "张三\nzhangsan@email.com".to_string(),
        }))
        .await
        .unwrap();

        assert!(response.0.success);
        assert_eq!(response.0.data.name.as_deref(), Some("张三"));
        assert_eq!(response.0.data.email.as_deref(), Some("zhangsan@email.com"));
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let result = handle_parse_personal_info(Json(ParsePersonalInfoRequest {
            text: "   \n ".to_string(),
        }))
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
