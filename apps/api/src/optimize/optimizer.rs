//! Optimization-request client — builds the prompt, makes one upstream
//! call, and decodes the model's free-text reply into a structured result.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError, DEFAULT_MODEL};
use crate::optimize::prompts::{build_optimize_prompt, OPTIMIZE_SYSTEM};

/// `optimizedResume` substitute when the reply carries no content at all.
const FAILURE_TEXT: &str = "Optimization failed";
/// Single suggestion attached to a reply with no embedded JSON object.
const PLAIN_REPLY_SUGGESTION: &str = "Please review the optimized resume content";
/// Single suggestion attached when an embedded JSON object would not parse.
const PARSE_ERROR_SUGGESTION: &str = "An error occurred while parsing the response";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub personal_info: String,
    pub target_job: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub optimized_resume: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Runs one optimization round trip. Upstream/transport failures surface as
/// `LlmError`; an unusable reply body never does (see `decode_reply`).
pub async fn optimize_resume(
    llm: &LlmClient,
    request: &OptimizeRequest,
) -> Result<OptimizationResult, LlmError> {
    let prompt = build_optimize_prompt(&request.personal_info, request.target_job.as_deref());
    let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);

    let reply = llm.chat(model, OPTIMIZE_SYSTEM, &prompt).await?;

    Ok(decode_reply(reply.content()))
}

/// Decodes the reply text. Never fails: a reply that cannot be decoded
/// degrades to the raw text (or a fixed failure marker) with a one-element
/// suggestion list naming what went wrong.
pub(crate) fn decode_reply(content: Option<&str>) -> OptimizationResult {
    let Some(content) = content else {
        warn!("upstream reply had no content");
        return OptimizationResult {
            optimized_resume: FAILURE_TEXT.to_string(),
            suggestions: vec![PARSE_ERROR_SUGGESTION.to_string()],
            keywords: vec![],
        };
    };

    let Some(json) = extract_json_object(content) else {
        return OptimizationResult {
            optimized_resume: content.to_string(),
            suggestions: vec![PLAIN_REPLY_SUGGESTION.to_string()],
            keywords: vec![],
        };
    };

    match serde_json::from_str::<Value>(json) {
        Ok(parsed) => OptimizationResult {
            optimized_resume: parsed
                .get("optimizedResume")
                .and_then(Value::as_str)
                .unwrap_or(content)
                .to_string(),
            suggestions: string_array(&parsed, "suggestions"),
            keywords: string_array(&parsed, "keywords"),
        },
        Err(e) => {
            warn!("embedded JSON failed to parse: {e}");
            OptimizationResult {
                optimized_resume: content.to_string(),
                suggestions: vec![PARSE_ERROR_SUGGESTION.to_string()],
                keywords: vec![],
            }
        }
    }
}

/// First greedy brace-delimited substring of the reply. Greedy on purpose:
/// it spans nested objects, at the cost of also spanning any prose between
/// two separate objects.
fn extract_json_object(text: &str) -> Option<&str> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"));

    pattern.find(text).map(|m| m.as_str())
}

fn string_array(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROSE_WRAPPED_REPLY: &str = "Here is your optimized resume:\n\
        {\"optimizedResume\": \"Zhang San — Senior Engineer\", \
         \"suggestions\": [\"Quantify impact\"], \
         \"keywords\": [\"Rust\", \"axum\"]}\n\
        Good luck with the application!";

    #[test]
    fn test_decode_extracts_object_embedded_in_prose() {
        let result = decode_reply(Some(PROSE_WRAPPED_REPLY));
        assert_eq!(result.optimized_resume, "Zhang San — Senior Engineer");
        assert_eq!(result.suggestions, vec!["Quantify impact"]);
        assert_eq!(result.keywords, vec!["Rust", "axum"]);
    }

    #[test]
    fn test_decode_defaults_absent_lists_to_empty() {
        let result = decode_reply(Some("{\"optimizedResume\": \"content\"}"));
        assert_eq!(result.optimized_resume, "content");
        assert!(result.suggestions.is_empty());
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_decode_falls_back_to_full_text_when_key_missing() {
        let reply = "{\"unrelated\": true}";
        let result = decode_reply(Some(reply));
        assert_eq!(result.optimized_resume, reply);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_decode_without_json_returns_raw_reply() {
        let reply = "I rewrote your resume as plain prose instead.";
        let result = decode_reply(Some(reply));
        assert_eq!(result.optimized_resume, reply);
        assert_eq!(result.suggestions, vec![PLAIN_REPLY_SUGGESTION.to_string()]);
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_decode_with_unparseable_braces_degrades() {
        let reply = "Result: {this is not json}";
        let result = decode_reply(Some(reply));
        assert_eq!(result.optimized_resume, reply);
        assert_eq!(result.suggestions, vec![PARSE_ERROR_SUGGESTION.to_string()]);
    }

    #[test]
    fn test_decode_missing_content_reports_failure() {
        let result = decode_reply(None);
        assert_eq!(result.optimized_resume, FAILURE_TEXT);
        assert_eq!(result.suggestions, vec![PARSE_ERROR_SUGGESTION.to_string()]);
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_greedy_match_spans_two_objects() {
        // Two objects with prose between them parse as one invalid span,
        // which degrades rather than silently picking either object.
        let reply = "{\"a\": 1} or maybe {\"b\": 2}";
        let result = decode_reply(Some(reply));
        assert_eq!(result.optimized_resume, reply);
        assert_eq!(result.suggestions, vec![PARSE_ERROR_SUGGESTION.to_string()]);
    }

    #[test]
    fn test_non_string_suggestions_are_skipped() {
        let reply = "{\"optimizedResume\": \"r\", \"suggestions\": [\"keep\", 42, null]}";
        let result = decode_reply(Some(reply));
        assert_eq!(result.suggestions, vec!["keep"]);
    }

    #[test]
    fn test_optimize_request_deserializes_camel_case() {
        let json = r#"{"personalInfo": "张三", "targetJob": "backend", "model": "deepseek-chat"}"#;
        let request: OptimizeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.personal_info, "张三");
        assert_eq!(request.target_job.as_deref(), Some("backend"));
        assert_eq!(request.model.as_deref(), Some("deepseek-chat"));

        let minimal: OptimizeRequest = serde_json::from_str(r#"{"personalInfo": "x"}"#).unwrap();
        assert_eq!(minimal.target_job, None);
        assert_eq!(minimal.model, None);
    }

    #[test]
    fn test_optimization_result_serializes_camel_case() {
        let result = OptimizationResult {
            optimized_resume: "content".to_string(),
            suggestions: vec![],
            keywords: vec!["Rust".to_string()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["optimizedResume"], "content");
        assert_eq!(value["keywords"][0], "Rust");
    }
}
