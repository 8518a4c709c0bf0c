//! Common types for chat completions.

use serde::{Deserialize, Serialize};

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// A provider reply after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub usage: Usage,
}

/// The reply handed back to callers of the gateway.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompletionResult {
    pub content: String,
    /// The requested model id, echoed back.
    pub model: String,
    pub usage: Usage,
    /// Set when the reply came from the fallback responder after an upstream failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Placeholder used when a provider answered but carried no text.
pub(crate) const EMPTY_RESPONSE: &str = "No response generated";

/// Normalize extracted content, substituting the placeholder for missing or empty text.
pub(crate) fn content_or_placeholder(content: Option<String>) -> String {
    content
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| EMPTY_RESPONSE.to_string())
}
