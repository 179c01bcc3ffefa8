//! LLM Client: the single point of entry for all Groq API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! Callers depend on the [`TextGenerator`] trait, carried in `AppState`.
//!
//! Model: llama-3.3-70b-versatile (hardcoded, not configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for every generation.
pub const MODEL: &str = "llama-3.3-70b-versatile";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Turns a composed prompt into completion text. One call, no retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

/// Groq chat-completions client with the sales-assistant system role.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Result<Self, GenerationError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
        })
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request_body = build_request(prompt);

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        parse_completion(&body)
    }
}

fn build_request(prompt: &str) -> ChatRequest<'_> {
    ChatRequest {
        model: MODEL,
        messages: [
            ChatMessage {
                role: "system",
                content: prompts::SALES_ASSISTANT_SYSTEM,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
    }
}

/// Prefers the structured `{"error":{"message"}}` body; falls back to the raw text.
fn api_error(status: u16, body: String) -> GenerationError {
    let message = serde_json::from_str::<GroqError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    GenerationError::Api { status, message }
}

/// Extracts the first choice's text from a completion body.
fn parse_completion(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage {
        debug!(
            "Completion succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(GenerationError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_system_then_user_message() {
        let value = serde_json::to_value(build_request("Create a pitch for X to Y")).unwrap();
        assert_eq!(value["model"], MODEL);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(
            value["messages"][0]["content"],
            "You are an expert AI sales assistant."
        );
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "Create a pitch for X to Y");
    }

    #[test]
    fn test_parse_completion_takes_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        }"#;
        assert_eq!(parse_completion(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_completion_without_choices_is_empty_content() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyContent));
    }

    #[test]
    fn test_parse_completion_rejects_malformed_body() {
        let err = parse_completion("not json").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_api_error_extracts_message() {
        let err = api_error(401, r#"{"error":{"message":"Invalid API Key"}}"#.to_string());
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(503, "upstream unavailable".to_string());
        assert_eq!(
            err.to_string(),
            "API error (status 503): upstream unavailable"
        );
    }
}
