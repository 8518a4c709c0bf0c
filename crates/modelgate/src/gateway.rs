//! Completion gateway: validate, route to a provider, fall back when needed.
//!
//! Once a request passes validation the caller always gets a reply. A model
//! without a credential is answered by the fallback responder directly; an
//! upstream failure is answered by the fallback responder with a warning.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::fallback;
use crate::llm::catalog::{self, ModelDescriptor};
use crate::llm::{CompletionResult, Message, ProviderRegistry, Role, Usage};

/// Warning attached to replies that replaced a failed upstream call.
pub const FALLBACK_WARNING: &str = "Using fallback response - AI API unavailable";

/// Request rejected before any provider was contacted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Messages are required")]
    EmptyMessages,

    #[error("Invalid AI model selected")]
    UnknownModel(String),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The caller went away while the upstream call was in flight.
    #[error("request cancelled")]
    Cancelled,
}

/// Stateless completion gateway; cheap to clone and share across tasks.
#[derive(Clone, Default)]
pub struct Gateway {
    providers: ProviderRegistry,
}

impl Gateway {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Check a request without side effects.
    pub fn validate(
        model: &str,
        messages: &[Message],
    ) -> Result<&'static ModelDescriptor, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::EmptyMessages);
        }
        catalog::lookup(model).ok_or_else(|| ValidationError::UnknownModel(model.to_string()))
    }

    pub async fn complete(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<CompletionResult, GatewayError> {
        self.complete_with_cancel(model, messages, &CancellationToken::new())
            .await
    }

    /// Complete a conversation, aborting the upstream call if `cancel` fires.
    #[tracing::instrument(
        name = "complete",
        skip(self, messages, cancel),
        fields(messages = messages.len())
    )]
    pub async fn complete_with_cancel(
        &self,
        model: &str,
        messages: &[Message],
        cancel: &CancellationToken,
    ) -> Result<CompletionResult, GatewayError> {
        let descriptor = Self::validate(model, messages)?;

        let Some(provider) = self.providers.get(descriptor.id) else {
            debug!(
                credential = descriptor.credential_env,
                "No credential configured, using fallback responder"
            );
            return Ok(fallback_result(descriptor.id, messages, None));
        };

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(GatewayError::Cancelled),
            outcome = provider.complete(messages) => outcome,
        };

        match outcome {
            Ok(completion) => {
                info!(
                    total_tokens = completion.usage.total_tokens,
                    "Upstream completion succeeded"
                );
                Ok(CompletionResult {
                    content: completion.content,
                    model: descriptor.id.to_string(),
                    usage: completion.usage,
                    warning: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Upstream completion failed, using fallback responder");
                Ok(fallback_result(
                    descriptor.id,
                    messages,
                    Some(FALLBACK_WARNING.to_string()),
                ))
            }
        }
    }
}

fn fallback_result(model: &str, messages: &[Message], warning: Option<String>) -> CompletionResult {
    let last_user = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map_or("", |m| m.content.as_str());

    CompletionResult {
        content: fallback::respond(last_user, model),
        model: model.to_string(),
        usage: Usage::default(),
        warning,
    }
}

// ============================================================================
// Tests
// ============================================================================
