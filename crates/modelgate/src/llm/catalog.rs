//! Fixed catalog of supported models.
//!
//! Every model id a caller may request lives here, together with the upstream
//! endpoint, the environment variable holding its credential, and the wire
//! format used to talk to it. The table is static data; nothing in it is
//! configurable at runtime.

/// Model id used when a request does not name one.
pub const DEFAULT_MODEL: &str = "gpt4-turbo";

/// Wire format family spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// `chat/completions` shape, bearer token auth.
    OpenAICompatible,
    /// Messages API, `x-api-key` header, system prompt as a separate field.
    Anthropic,
    /// `generateContent` shape, key passed as a query parameter.
    Google,
}

/// Static description of one selectable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub provider: &'static str,
    pub upstream_endpoint: &'static str,
    pub upstream_model: &'static str,
    pub credential_env: &'static str,
    pub wire_format: WireFormat,
    pub description: &'static str,
    pub capabilities: &'static [&'static str],
    /// Bullet list quoted by the fallback responder.
    pub capability_summary: &'static str,
    pub key_instructions: &'static str,
}

pub static MODELS: [ModelDescriptor; 6] = [
    ModelDescriptor {
        id: "gpt4-turbo",
        display_name: "GPT-4 Turbo",
        provider: "OpenAI",
        upstream_endpoint: "https://api.openai.com/v1/chat/completions",
        upstream_model: "gpt-4-turbo-preview",
        credential_env: "OPENAI_API_KEY",
        wire_format: WireFormat::OpenAICompatible,
        description: "Advanced reasoning and problem-solving with unlimited context understanding",
        capabilities: &[
            "Unlimited reasoning",
            "Code generation",
            "Creative writing",
            "Complex analysis",
        ],
        capability_summary: "✅ Advanced reasoning and problem-solving\n✅ Code generation across all languages\n✅ Creative writing and content creation\n✅ Complex data analysis\n✅ Multilingual support\n✅ Long context understanding (128K tokens)",
        key_instructions: "Visit https://platform.openai.com/api-keys to create an API key",
    },
    ModelDescriptor {
        id: "claude-opus",
        display_name: "Claude Opus",
        provider: "Anthropic",
        upstream_endpoint: "https://api.anthropic.com/v1/messages",
        upstream_model: "claude-3-opus-20240229",
        credential_env: "ANTHROPIC_API_KEY",
        wire_format: WireFormat::Anthropic,
        description: "Specialized in creative writing, analysis, and nuanced conversations",
        capabilities: &[
            "Creative writing",
            "Long-form content",
            "Analysis",
            "Research",
        ],
        capability_summary: "✅ Exceptional creative writing\n✅ Long-form content generation\n✅ Nuanced analysis and reasoning\n✅ Research and summarization\n✅ Code understanding and generation\n✅ Extended context (200K tokens)",
        key_instructions: "Visit https://console.anthropic.com/ to get your API key",
    },
    ModelDescriptor {
        id: "gemini-ultra",
        display_name: "Gemini Ultra",
        provider: "Google",
        upstream_endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent",
        upstream_model: "gemini-pro",
        credential_env: "GOOGLE_AI_API_KEY",
        wire_format: WireFormat::Google,
        description: "Multimodal AI with advanced image understanding and processing",
        capabilities: &[
            "Multimodal analysis",
            "Image processing",
            "Video understanding",
            "Real-time data",
        ],
        capability_summary: "✅ Multimodal understanding (text, images, video)\n✅ Real-time information processing\n✅ Code generation and debugging\n✅ Fast inference speed\n✅ Advanced reasoning\n✅ Vision AI capabilities",
        key_instructions: "Visit https://makersuite.google.com/app/apikey to generate an API key",
    },
    ModelDescriptor {
        id: "llama-3",
        display_name: "Llama 3",
        provider: "Meta",
        upstream_endpoint: "https://api.together.xyz/v1/chat/completions",
        upstream_model: "meta-llama/Llama-3-70b-chat-hf",
        credential_env: "TOGETHER_API_KEY",
        wire_format: WireFormat::OpenAICompatible,
        description: "Open-source powerhouse with strong general capabilities",
        capabilities: &[
            "General knowledge",
            "Conversation",
            "Task completion",
            "Code assistance",
        ],
        capability_summary: "✅ Open-source flexibility\n✅ General knowledge and conversation\n✅ Code assistance\n✅ Task completion\n✅ Multilingual support\n✅ Community-driven improvements",
        key_instructions: "Visit https://api.together.xyz/ to get your Together AI API key",
    },
    ModelDescriptor {
        id: "mistral-large",
        display_name: "Mistral Large",
        provider: "Mistral AI",
        upstream_endpoint: "https://api.mistral.ai/v1/chat/completions",
        upstream_model: "mistral-large-latest",
        credential_env: "MISTRAL_API_KEY",
        wire_format: WireFormat::OpenAICompatible,
        description: "European AI model with strong performance across multiple tasks",
        capabilities: &["Reasoning", "Code", "Multilingual", "Math & logic"],
        capability_summary: "✅ Strong reasoning capabilities\n✅ Code proficiency\n✅ Math and logical operations\n✅ Multilingual support\n✅ European AI standards\n✅ High performance",
        key_instructions: "Visit https://console.mistral.ai/ to obtain your API key",
    },
    ModelDescriptor {
        id: "perplexity",
        display_name: "Perplexity AI",
        provider: "Perplexity",
        upstream_endpoint: "https://api.perplexity.ai/chat/completions",
        upstream_model: "llama-3.1-sonar-large-128k-online",
        credential_env: "PERPLEXITY_API_KEY",
        wire_format: WireFormat::OpenAICompatible,
        description: "Research-focused AI with real-time web search capabilities",
        capabilities: &[
            "Real-time search",
            "Research",
            "Citations",
            "Current events",
        ],
        capability_summary: "✅ Real-time web search integration\n✅ Research and citations\n✅ Current events knowledge\n✅ Source attribution\n✅ Fact-checking capabilities\n✅ Up-to-date information",
        key_instructions: "Visit https://www.perplexity.ai/settings/api to get your API key",
    },
];

/// Look up a model by id.
pub fn lookup(id: &str) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|m| m.id == id)
}

/// All models, in display order.
pub fn all() -> &'static [ModelDescriptor] {
    &MODELS
}
