//! Canned replies used when a provider cannot be called.
//!
//! The input is classified by case-insensitive substring match against an
//! ordered rule list; the first matching rule picks the template. Keywords
//! match anywhere (`hi` also matches "this"), so rule order matters.

use crate::llm::catalog::{self, ModelDescriptor};

/// What the user seems to be asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Wellbeing,
    Coding,
    Creative,
    Capabilities,
    Setup,
    Other,
}

/// Classification rules, checked in order.
const RULES: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hello", "hi", "hey"]),
    (Intent::Wellbeing, &["how are you", "how do you do"]),
    (Intent::Coding, &["code", "programming", "developer"]),
    (Intent::Creative, &["write", "create", "generate"]),
    (
        Intent::Capabilities,
        &["what can you do", "capabilities", "features"],
    ),
    (Intent::Setup, &["api", "configure", "setup"]),
];

/// Classify a user message.
pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(Intent::Other, |(intent, _)| *intent)
}

/// Build the canned reply for `message` addressed to `model`.
///
/// Total: any input, including an empty message or an id outside the
/// catalog, yields a non-empty reply.
pub fn respond(message: &str, model: &str) -> String {
    let profile = Profile::new(model);
    let name = profile.display_name;

    match classify(message) {
        Intent::Greeting => format!(
            "Hello! I'm {name}, an AI assistant. I'm currently running in demo mode since API keys are not configured. However, I can still help you understand my capabilities and answer general questions. What would you like to know?"
        ),
        Intent::Wellbeing => format!(
            "I'm functioning well, thank you for asking! I'm {name}, operating in demonstration mode. While I don't have access to my full AI capabilities right now, I can explain how I work and what I can do when properly configured. What interests you?"
        ),
        Intent::Coding => format!(
            "As {name}, I specialize in code generation, debugging, and technical explanations. In production mode with API access, I can:\n\n\
             • Write code in multiple programming languages\n\
             • Debug and optimize existing code\n\
             • Explain complex technical concepts\n\
             • Review code architecture\n\
             • Suggest best practices\n\n\
             To enable full functionality, the developer needs to add the appropriate API key for {model} in the environment variables."
        ),
        Intent::Creative => format!(
            "I'm {name}, and I excel at creative and technical content generation. When fully configured, I can help you:\n\n\
             • Write articles, essays, and creative stories\n\
             • Generate technical documentation\n\
             • Create marketing copy\n\
             • Draft emails and business communications\n\
             • Develop educational content\n\n\
             Currently running in demo mode - full capabilities available once API keys are configured."
        ),
        Intent::Capabilities => format!(
            "I'm {name} with extensive capabilities:\n\n{capabilities}\n\n\
             **Current Status:** Demo Mode\n\
             To unlock full AI capabilities, add the {upper} API key to your environment variables:\n\n\
             ```\n{env}=your_api_key_here\n```\n\n\
             Once configured, I'll provide real-time, intelligent responses powered by state-of-the-art AI.",
            capabilities = profile.capability_summary,
            upper = model.to_uppercase(),
            env = profile.env_var,
        ),
        Intent::Setup => format!(
            "To enable full AI functionality for {name}, you need to:\n\n\
             1. **Get an API Key:**\n   {instructions}\n\n\
             2. **Add to Environment Variables:**\n   Create a `.env` file in your project root:\n   ```\n   {env}=your_api_key_here\n   ```\n\n\
             3. **Restart the Application:**\n   The changes will take effect after restarting the server.\n\n\
             Once configured, I'll provide intelligent, context-aware responses using the actual {name} AI model.",
            instructions = profile.key_instructions,
            env = profile.env_var,
        ),
        Intent::Other => format!(
            "I'm {name}, currently operating in demonstration mode. Your message: \"{message}\"\n\n\
             I understand you're looking for information about \"{message}\". In full production mode with API access, I would provide you with:\n\n\
             • Detailed, context-aware responses\n\
             • Creative and technical solutions\n\
             • In-depth analysis and explanations\n\
             • Code generation and debugging\n\
             • Multi-turn conversation memory\n\n\
             **To enable full functionality:** Add your {upper} API key to the environment variables as `{env}`.\n\n\
             Would you like to know more about my capabilities or how to configure the API access?",
            upper = model.to_uppercase(),
            env = profile.env_var,
        ),
    }
}

/// Template inputs for a model, with generic values for ids outside the catalog.
struct Profile<'a> {
    display_name: &'a str,
    capability_summary: &'a str,
    key_instructions: &'a str,
    env_var: String,
}

impl<'a> Profile<'a> {
    fn new(model: &'a str) -> Self {
        match catalog::lookup(model) {
            Some(m) => Self::from_descriptor(m),
            None => Self {
                display_name: model,
                capability_summary: "Advanced AI capabilities",
                key_instructions: "Refer to the AI provider's documentation for API key instructions",
                env_var: format!("{}_API_KEY", model.to_uppercase().replacen('-', "_", 1)),
            },
        }
    }

    fn from_descriptor(m: &'static ModelDescriptor) -> Self {
        Self {
            display_name: m.display_name,
            capability_summary: m.capability_summary,
            key_instructions: m.key_instructions,
            env_var: m.credential_env.to_string(),
        }
    }
}
