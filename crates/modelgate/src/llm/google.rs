//! Google Generative Language provider (`generateContent`).

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::error::{LLMError, read_json};
use super::provider::LLMProvider;
use super::types::{Completion, Message, Role, Usage, content_or_placeholder};

/// Google provider. The key travels as a `key` query parameter, not a header.
pub struct GoogleProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleProvider {
    /// `endpoint` is the full `models/<model>:generateContent` URL; the model is
    /// part of the path, so no separate model name is sent.
    #[must_use]
    pub fn new(client: Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    fn request_url(&self) -> Result<Url, LLMError> {
        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl LLMProvider for GoogleProvider {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, LLMError> {
        let request = to_request(messages);

        let response = self
            .client
            .post(self.request_url()?)
            .header("Content-Type", "application/json")
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
    contents: Vec<Content<'a>>,
}

#[derive(Debug, serde::Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

// ============================================================================
// Conversions
// ============================================================================

/// Google only knows `user` and `model`; system turns are sent as `user`.
fn role_label(role: Role) -> &'static str {
    match role {
        Role::Assistant => "model",
        Role::User | Role::System => "user",
    }
}

fn to_request(messages: &[Message]) -> Request<'_> {
    Request {
        contents: messages
            .iter()
            .map(|m| Content {
                role: role_label(m.role),
                parts: [Part { text: &m.content }],
            })
            .collect(),
    }
}

fn from_response(response: Response) -> Completion {
    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text);

    Completion {
        content: content_or_placeholder(content),
        usage: response
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
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
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn assistant_role_becomes_model() {
        let messages = vec![
            Message::user("Hi"),
            Message::assistant("Hello"),
            Message::user("Again"),
        ];

        let json = serde_json::to_value(to_request(&messages)).unwrap();

        assert_eq!(
            json,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "Hi"}]},
                    {"role": "model", "parts": [{"text": "Hello"}]},
                    {"role": "user", "parts": [{"text": "Again"}]}
                ]
            })
        );
    }

    #[test]
    fn system_role_is_sent_as_user() {
        let messages = vec![Message::system("Be nice")];
        let json = serde_json::to_value(to_request(&messages)).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn request_url_appends_key() {
        let provider = GoogleProvider::new(
            Client::new(),
            "https://example.test/v1beta/models/gemini-pro:generateContent".to_string(),
            "g key".to_string(),
        );

        let url = provider.request_url().unwrap();
        assert_eq!(url.path(), "/v1beta/models/gemini-pro:generateContent");
        assert_eq!(url.query(), Some("key=g+key"));
    }

    #[test]
    fn response_extracts_first_part_and_usage() {
        let response: Response = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Gemini here"}, {"text": "more"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 3, "totalTokenCount": 10}
        }))
        .unwrap();

        let completion = from_response(response);
        assert_eq!(completion.content, "Gemini here");
        assert_eq!(completion.usage.prompt_tokens, 7);
        assert_eq!(completion.usage.completion_tokens, 3);
        assert_eq!(completion.usage.total_tokens, 10);
    }

    #[test]
    fn blocked_candidate_uses_placeholder() {
        let response: Response = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert_eq!(from_response(response).content, "No response generated");
    }

    #[test]
    fn response_missing_candidates_is_rejected() {
        assert!(serde_json::from_value::<Response>(json!({"promptFeedback": {}})).is_err());
    }

    #[tokio::test]
    async fn complete_passes_key_as_query_param() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(query_param("key", "g-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleProvider::new(
            Client::new(),
            format!("{}/v1beta/models/gemini-pro:generateContent", server.uri()),
            "g-test".to_string(),
        );

        let completion = provider.complete(&[Message::user("Hi")]).await.unwrap();
        assert_eq!(completion.content, "ok");

        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("authorization").is_none());
    }
}
