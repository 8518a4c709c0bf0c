//! Anthropic LLM provider with native API format.

use async_trait::async_trait;
use reqwest::Client;

use super::error::{LLMError, read_json};
use super::provider::LLMProvider;
use super::types::{Completion, Message, Role, Usage, content_or_placeholder};

/// Anthropic provider speaking the Messages API.
pub struct AnthropicProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    api_version: String,
}

impl AnthropicProvider {
    pub const DEFAULT_API_VERSION: &'static str = "2023-06-01";
    pub const MAX_TOKENS: u32 = 2000;

    /// `endpoint` is the full `/v1/messages` URL.
    #[must_use]
    pub fn new(client: Client, endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            model,
            api_key,
            api_version: Self::DEFAULT_API_VERSION.to_string(),
        }
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, LLMError> {
        let request = to_request(&self.model, messages);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
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
    messages: Vec<RequestMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    max_tokens: u32,
}

#[derive(Debug, serde::Serialize)]
struct RequestMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct Response {
    content: Vec<ResponseContent>,
    #[serde(default)]
    usage: Option<ResponseUsage>,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    text: Option<String>,
}

#[derive(serde::Deserialize)]
struct ResponseUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

// ============================================================================
// Conversions
// ============================================================================

/// The first system message becomes the `system` field; every system message
/// is dropped from the message list.
fn to_request<'a>(model: &'a str, messages: &'a [Message]) -> Request<'a> {
    let system = messages
        .iter()
        .find(|m| m.role == Role::System)
        .map(|m| m.content.as_str());

    let messages = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| RequestMessage {
            role: m.role,
            content: &m.content,
        })
        .collect();

    Request {
        model,
        messages,
        system,
        max_tokens: AnthropicProvider::MAX_TOKENS,
    }
}

fn from_response(response: Response) -> Completion {
    let content = response.content.into_iter().next().and_then(|c| c.text);

    Completion {
        content: content_or_placeholder(content),
        usage: response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens.saturating_add(u.output_tokens),
            })
            .unwrap_or_default(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn system_message_moves_to_separate_field() {
        let messages = vec![Message::system("S"), Message::user("U")];

        let json = serde_json::to_value(to_request("claude-3-opus-20240229", &messages)).unwrap();

        assert_eq!(json["system"], "S");
        assert_eq!(json["max_tokens"], 2000);
        assert_eq!(json["messages"], json!([{"role": "user", "content": "U"}]));
    }

    #[test]
    fn only_first_system_message_is_kept() {
        let messages = vec![
            Message::system("first"),
            Message::user("U1"),
            Message::system("second"),
            Message::assistant("A1"),
        ];

        let json = serde_json::to_value(to_request("m", &messages)).unwrap();

        assert_eq!(json["system"], "first");
        assert_eq!(
            json["messages"],
            json!([
                {"role": "user", "content": "U1"},
                {"role": "assistant", "content": "A1"}
            ])
        );
    }

    #[test]
    fn no_system_field_without_system_message() {
        let messages = vec![Message::user("U")];
        let json = serde_json::to_value(to_request("m", &messages)).unwrap();
        assert!(json.get("system").is_none());
    }

    #[test]
    fn response_extracts_first_block_and_usage() {
        let response: Response = serde_json::from_value(json!({
            "id": "msg_01",
            "type": "message",
            "content": [{"type": "text", "text": "Hello"}, {"type": "text", "text": "again"}],
            "usage": {"input_tokens": 12, "output_tokens": 5}
        }))
        .unwrap();

        let completion = from_response(response);
        assert_eq!(completion.content, "Hello");
        assert_eq!(completion.usage.prompt_tokens, 12);
        assert_eq!(completion.usage.completion_tokens, 5);
        assert_eq!(completion.usage.total_tokens, 17);
    }

    #[test]
    fn oversized_usage_saturates() {
        let response: Response = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "ok"}],
            "usage": {"input_tokens": u32::MAX, "output_tokens": 1}
        }))
        .unwrap();

        let completion = from_response(response);
        assert_eq!(completion.content, "ok");
        assert_eq!(completion.usage.prompt_tokens, u32::MAX);
        assert_eq!(completion.usage.total_tokens, u32::MAX);
    }

    #[test]
    fn response_with_empty_content_uses_placeholder() {
        let response: Response = serde_json::from_value(json!({"content": []})).unwrap();
        let completion = from_response(response);
        assert_eq!(completion.content, "No response generated");
        assert_eq!(completion.usage, Usage::default());
    }

    #[tokio::test]
    async fn complete_sends_api_key_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "Hi from Claude"}],
                "usage": {"input_tokens": 2, "output_tokens": 4}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new(
            Client::new(),
            format!("{}/v1/messages", server.uri()),
            "claude-3-opus-20240229".to_string(),
            "ant-test".to_string(),
        );

        let completion = provider
            .complete(&[Message::system("S"), Message::user("U")])
            .await
            .unwrap();
        assert_eq!(completion.content, "Hi from Claude");
        assert_eq!(completion.usage.total_tokens, 6);
    }
}
