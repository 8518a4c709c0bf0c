//! OpenAI-compatible LLM provider.
//!
//! Works with OpenAI, Together, Mistral, Perplexity and other APIs that accept
//! the `chat/completions` request shape.

use async_trait::async_trait;
use reqwest::Client;

use super::error::{LLMError, read_json};
use super::provider::LLMProvider;
use super::types::{Completion, Message, Usage, content_or_placeholder};

/// OpenAI-compatible provider.
pub struct OpenAICompatibleProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAICompatibleProvider {
    pub const TEMPERATURE: f32 = 0.7;
    pub const MAX_TOKENS: u32 = 2000;

    /// `endpoint` is the full `chat/completions` URL.
    #[must_use]
    pub fn new(client: Client, endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            model,
            api_key,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, LLMError> {
        let request = to_request(&self.model, messages);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let body: Response = read_json(response).await?;
        Ok(from_response(body))
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(serde::Deserialize)]
struct Response {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(serde::Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(serde::Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

fn to_request<'a>(model: &'a str, messages: &'a [Message]) -> Request<'a> {
    Request {
        model,
        messages,
        temperature: OpenAICompatibleProvider::TEMPERATURE,
        max_tokens: OpenAICompatibleProvider::MAX_TOKENS,
    }
}

fn from_response(response: Response) -> Completion {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content);

    Completion {
        content: content_or_placeholder(content),
        usage: response.usage.unwrap_or_default(),
    }
}

// ============================================================================
// Tests
// ============================================================================
