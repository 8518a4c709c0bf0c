//! LLM provider trait.

use async_trait::async_trait;

use super::error::LLMError;
use super::types::{Completion, Message};

/// A provider adapter: shapes a conversation into one wire format and
/// normalizes the reply.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send the conversation upstream and return the normalized reply.
    async fn complete(&self, messages: &[Message]) -> Result<Completion, LLMError>;
}
