//! LLM provider clients for chat completions.

pub mod catalog;
mod error;
mod types;

mod anthropic;
mod google;
mod openai;
mod provider;
mod registry;

pub use catalog::{DEFAULT_MODEL, ModelDescriptor, WireFormat};
pub use error::LLMError;
pub use types::{Completion, CompletionResult, Message, Role, Usage};

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use openai::OpenAICompatibleProvider;
pub use provider::LLMProvider;
pub use registry::{Credentials, ProviderRegistry};
