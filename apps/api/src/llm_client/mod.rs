//! LLM client - the single point of entry for all OpenAI API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
//! All embedding and completion traffic MUST go through this module.
//!
//! No retry logic lives here: both capabilities are called exactly once per
//! request, and callers needing resilience retry the whole operation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Models are intentionally hardcoded to prevent accidental drift between the
/// embedding model and the dimensionality of the stored vector column.
pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const CHAT_MODEL: &str = "gpt-4o-mini";

/// Dimensionality of `text-embedding-3-small`, and of the `vector(1536)`
/// column in the resumes table. A mismatch here is a deployment bug.
pub const EMBEDDING_DIMENSIONS: usize = 1536;

/// Sampling temperature for email generation: varied phrasing, still on-topic.
const TEMPERATURE: f32 = 0.7;
const MAX_COMPLETION_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider returned empty content")]
    EmptyContent,

    #[error("Embedding dimensionality mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The single OpenAI client used by the ingestion and outreach services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
        })
    }

    /// Embeds text into a fixed-length vector.
    ///
    /// The returned vector always has [`EMBEDDING_DIMENSIONS`] entries; any
    /// other length means the configured model and the stored column have
    /// drifted apart and the call fails.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let response = self
            .client
            .post(EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: EMBEDDING_MODEL,
                input: text,
            })
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: EmbeddingResponse = response.json().await?;

        let embedding = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(LlmError::EmptyContent)?;

        if embedding.len() != EMBEDDING_DIMENSIONS {
            return Err(LlmError::DimensionMismatch {
                expected: EMBEDDING_DIMENSIONS,
                actual: embedding.len(),
            });
        }

        debug!("Embedding call succeeded: {} dims", embedding.len());
        Ok(embedding)
    }

    /// Issues one chat completion constrained to a JSON object response and
    /// returns the parsed object. The prompt must describe the expected shape.
    pub async fn complete_json(&self, prompt: &str) -> Result<serde_json::Value, LlmError> {
        let request_body = json!({
            "model": CHAT_MODEL,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": { "type": "json_object" },
            "temperature": TEMPERATURE,
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: ChatResponse = response.json().await?;

        if let Some(usage) = &body.usage {
            debug!(
                "Completion call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)?;

        serde_json::from_str(strip_json_fences(&content)).map_err(LlmError::Parse)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<OpenAiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
/// JSON mode should never emit fences, but the check is cheap to keep.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"subject\": \"hi\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"subject\": \"hi\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"subject\": \"hi\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"subject\": \"hi\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"subject\": \"hi\"}";
        assert_eq!(strip_json_fences(input), "{\"subject\": \"hi\"}");
    }

    #[test]
    fn test_chat_response_deserializes() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"ok\": true}"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("{\"ok\": true}")
        );
    }

    #[test]
    fn test_embedding_response_deserializes() {
        let raw = r#"{"data": [{"embedding": [0.1, 0.2, 0.3]}]}"#;
        let parsed: EmbeddingResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data[0].embedding.len(), 3);
    }

    #[test]
    fn test_error_body_deserializes() {
        let raw = r#"{"error": {"message": "Incorrect API key", "type": "invalid_request_error"}}"#;
        let parsed: OpenAiError = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.error.message, "Incorrect API key");
    }
}
