/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the upstream API directly.
/// All LLM interactions MUST go through this module.
///
/// The upstream speaks the OpenAI-style chat-completion schema at
/// `{base_url}/chat/completions`, bearer-token authenticated. Calls are a
/// single attempt: failures are classified and surfaced, never retried.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

/// Keys shipped in setup templates. Treated as unconfigured so they never
/// reach the provider.
const PLACEHOLDER_KEYS: &[&str] = &[
    "your_deepseek_api_key_here",
    "sk-your-deepseek-api-key-here",
];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key rejected by upstream — set DEEPSEEK_API_KEY to a valid key and restart")]
    InvalidApiKey,

    #[error("Upstream rate limit hit, retry in a moment")]
    RateLimited,

    #[error("Upstream server error (status {status}), retry later")]
    UpstreamServer { status: u16 },

    #[error("API request failed: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text content of the first choice, if the provider returned any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: UpstreamErrorBody,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Maps a non-success upstream status to the error taxonomy.
/// Fixed precedence: 401, then 429, then any 5xx, then generic.
pub(crate) fn classify_api_error(status: u16, body: &str) -> LlmError {
    match status {
        401 => LlmError::InvalidApiKey,
        429 => LlmError::RateLimited,
        s if s >= 500 => LlmError::UpstreamServer { status: s },
        s => LlmError::Api {
            status: s,
            message: extract_error_message(body),
        },
    }
}

/// Pulls `error.message` out of an upstream error body, falling back to the
/// raw body when it is not in that shape.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<UpstreamError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// The single LLM client used by all services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Whether a usable credential is present. Empty and placeholder keys
    /// count as unconfigured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !PLACEHOLDER_KEYS.contains(&self.api_key.as_str())
    }

    /// Makes one chat-completion call and returns the raw response object.
    pub async fn chat(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("chat completion returned {}: {}", status, body);
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let chat_response: ChatResponse = response.json().await?;

        debug!(
            "chat completion succeeded: {} choice(s)",
            chat_response.choices.len()
        );

        Ok(chat_response)
    }

    /// Probes the provider's model listing to check whether the configured
    /// credential is accepted.
    pub async fn validate_api_key(&self) -> bool {
        if !self.is_configured() {
            return false;
        }

        match self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_401_is_invalid_api_key() {
        let err = classify_api_error(401, r#"{"error":{"message":"bad key"}}"#);
        assert!(matches!(err, LlmError::InvalidApiKey));
        assert!(err.to_string().contains("DEEPSEEK_API_KEY"));
    }

    #[test]
    fn test_classify_429_is_rate_limited() {
        let err = classify_api_error(429, "");
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[test]
    fn test_classify_5xx_is_upstream_server() {
        for status in [500, 502, 503] {
            let err = classify_api_error(status, "");
            assert!(matches!(err, LlmError::UpstreamServer { status: s } if s == status));
        }
    }

    #[test]
    fn test_classify_other_carries_upstream_message() {
        let err = classify_api_error(404, r#"{"error":{"message":"model not found"}}"#);
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_falls_back_to_raw_body() {
        let err = classify_api_error(418, "not json at all");
        match err {
            LlmError::Api { message, .. } => assert_eq!(message, "not json at all"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_chat_response_content_extracts_first_choice() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "hello"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content(), Some("hello"));
    }

    #[test]
    fn test_chat_response_content_absent_when_no_choices() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.content(), None);
    }

    #[test]
    fn test_chat_request_serializes_sampling_params() {
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "deepseek-chat");
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_placeholder_keys_are_not_configured() {
        for key in ["", "your_deepseek_api_key_here", "sk-your-deepseek-api-key-here"] {
            let client = LlmClient::new(key.to_string(), "http://localhost".to_string());
            assert!(!client.is_configured(), "{key:?} should be unconfigured");
        }
        let client = LlmClient::new("sk-real".to_string(), "http://localhost".to_string());
        assert!(client.is_configured());
    }
}
