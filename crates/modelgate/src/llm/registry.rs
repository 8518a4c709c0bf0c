//! Provider registry for managing LLM provider instances.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};

use super::anthropic::AnthropicProvider;
use super::catalog::{self, ModelDescriptor, WireFormat};
use super::google::GoogleProvider;
use super::openai::OpenAICompatibleProvider;
use super::provider::LLMProvider;

// ============================================================================
// Credentials
// ============================================================================

/// Provider credentials, keyed by environment variable name.
///
/// Resolved once at startup; blank values are treated as absent.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: HashMap<String, String>,
}

impl Credentials {
    /// Read the credential variable of every catalog model from the environment.
    pub fn from_env() -> Self {
        Self::from_pairs(catalog::all().iter().filter_map(|m| {
            std::env::var(m.credential_env)
                .ok()
                .map(|v| (m.credential_env, v))
        }))
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let keys = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Self { keys }
    }

    /// The credential configured for a model, if any.
    pub fn for_model(&self, model: &ModelDescriptor) -> Option<&str> {
        self.keys.get(model.credential_env).map(String::as_str)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.keys.keys()).finish()
    }
}

// ============================================================================
// ProviderRegistry
// ============================================================================

/// Registry of live providers, keyed by model id.
///
/// A model without an entry has no credential and is served by the fallback
/// responder.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LLMProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter for every catalog model that has a credential.
    pub fn from_credentials(client: Client, credentials: &Credentials) -> Self {
        let mut registry = Self::new();

        for model in catalog::all() {
            let Some(api_key) = credentials.for_model(model) else {
                continue;
            };
            let provider = build_provider(client.clone(), model, api_key.to_string());
            registry.register(model.id, provider);
            info!(model = model.id, provider = model.provider, "Registered provider");
        }

        if registry.providers.is_empty() {
            warn!(
                "No LLM provider credentials configured; all replies will use the fallback responder"
            );
        }

        registry
    }

    /// Register a provider implementation for a model id.
    pub fn register(&mut self, model: impl Into<String>, implementation: Arc<dyn LLMProvider>) {
        self.providers.insert(model.into(), implementation);
    }

    /// Get the provider serving a model id.
    pub fn get(&self, model: &str) -> Option<Arc<dyn LLMProvider>> {
        self.providers.get(model).cloned()
    }

    pub fn is_configured(&self, model: &str) -> bool {
        self.providers.contains_key(model)
    }
}

/// Pick the adapter for a model's wire format.
fn build_provider(
    client: Client,
    model: &ModelDescriptor,
    api_key: String,
) -> Arc<dyn LLMProvider> {
    let endpoint = model.upstream_endpoint.to_string();
    let upstream_model = model.upstream_model.to_string();

    match model.wire_format {
        WireFormat::OpenAICompatible => Arc::new(OpenAICompatibleProvider::new(
            client,
            endpoint,
            upstream_model,
            api_key,
        )),
        WireFormat::Anthropic => Arc::new(AnthropicProvider::new(
            client,
            endpoint,
            upstream_model,
            api_key,
        )),
        WireFormat::Google => Arc::new(GoogleProvider::new(client, endpoint, api_key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_are_absent() {
        let credentials = Credentials::from_pairs([
            ("OPENAI_API_KEY", "sk-live"),
            ("ANTHROPIC_API_KEY", "   "),
            ("MISTRAL_API_KEY", ""),
        ]);

        assert_eq!(
            credentials.for_model(catalog::lookup("gpt4-turbo").unwrap()),
            Some("sk-live")
        );
        assert!(
            credentials
                .for_model(catalog::lookup("claude-opus").unwrap())
                .is_none()
        );
        assert!(
            credentials
                .for_model(catalog::lookup("mistral-large").unwrap())
                .is_none()
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let credentials = Credentials::from_pairs([("OPENAI_API_KEY", "sk-secret")]);
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("OPENAI_API_KEY"));
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn registry_only_holds_credentialed_models() {
        let credentials = Credentials::from_pairs([
            ("ANTHROPIC_API_KEY", "ant"),
            ("GOOGLE_AI_API_KEY", "goog"),
        ]);

        let registry = ProviderRegistry::from_credentials(Client::new(), &credentials);

        assert!(registry.is_configured("claude-opus"));
        assert!(registry.is_configured("gemini-ultra"));
        assert!(!registry.is_configured("gpt4-turbo"));
        assert!(registry.get("perplexity").is_none());
    }

    #[test]
    fn empty_registry_without_credentials() {
        let registry = ProviderRegistry::from_credentials(Client::new(), &Credentials::default());
        assert!(catalog::all().iter().all(|m| !registry.is_configured(m.id)));
    }
}
