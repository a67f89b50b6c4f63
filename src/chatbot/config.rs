//! Chatbot configuration and canned text
//!
//! Settings come from `CHATBOT_*` variables (plus the provider key variables)
//! through `ServerConfig`. A missing or blank key selects the keyword
//! responder.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Hosted LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Claude,
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Claude => "claude-3-5-sonnet-20241022",
            Provider::Gemini => "gemini-1.5-pro",
            Provider::OpenAi => "gpt-4-turbo-preview",
        }
    }

    /// Provider-specific key variable, consulted when `CHATBOT_API_KEY` is unset
    pub fn key_env(&self) -> &'static str {
        match self {
            Provider::Claude => "ANTHROPIC_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Provider::Claude => "Claude AI",
            Provider::Gemini => "Gemini AI",
            Provider::OpenAi => "OpenAI",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported AI service: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(Provider::Claude),
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "gpt" => Ok(Provider::OpenAi),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// Which answering path a chat request takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Llm(Provider),
    Keyword,
}

impl Backend {
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Llm(provider) => provider.label(),
            Backend::Keyword => "Keyword Intelligence",
        }
    }
}

/// Chatbot settings, read once at startup
#[derive(Debug, Clone)]
pub struct ChatbotConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Exchanges kept per session; history holds twice this many messages
    pub history_limit: usize,
    pub enable_tools: bool,
    pub timeout_secs: u64,
    /// Replaces the provider's public host, e.g. for a gateway or proxy
    pub base_url: Option<String>,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        let provider = Provider::Gemini;
        Self {
            provider,
            api_key: None,
            model: provider.default_model().to_string(),
            max_tokens: 2048,
            temperature: 0.7,
            history_limit: 10,
            enable_tools: false,
            timeout_secs: 60,
            base_url: None,
        }
    }
}

impl ChatbotConfig {
    /// Build from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let provider = match lookup("CHATBOT_SERVICE") {
            Some(raw) => raw.parse().unwrap_or_else(|e: UnknownProvider| {
                tracing::warn!("{}, using {}", e, defaults.provider);
                defaults.provider
            }),
            None => defaults.provider,
        };

        let api_key = lookup("CHATBOT_API_KEY")
            .or_else(|| lookup(provider.key_env()))
            .filter(|k| !k.trim().is_empty());

        let model = lookup("CHATBOT_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        Self {
            provider,
            api_key,
            model,
            max_tokens: parse_or(&lookup, "CHATBOT_MAX_TOKENS", defaults.max_tokens),
            temperature: parse_or(&lookup, "CHATBOT_TEMPERATURE", defaults.temperature),
            history_limit: parse_or(&lookup, "CHATBOT_HISTORY_LIMIT", defaults.history_limit),
            enable_tools: lookup("CHATBOT_ENABLE_TOOLS")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.enable_tools),
            timeout_secs: parse_or(&lookup, "CHATBOT_TIMEOUT_SECS", defaults.timeout_secs),
            base_url: lookup("CHATBOT_BASE_URL").filter(|u| !u.trim().is_empty()),
        }
    }

    /// LLM when a key is configured, keyword responder otherwise
    pub fn backend(&self) -> Backend {
        match self.api_key {
            Some(_) => Backend::Llm(self.provider),
            None => Backend::Keyword,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Prompt and canned text
// ============================================================================

pub const GREETING: &str =
    "Hello! I'm your AI Plant Breeding assistant. How can I help you today?";

pub const SYSTEM_PROMPT: &str = r#"You are an AI Plant Breeding Scientist and Agricultural Consultant for the Zer3aZ platform, specialised in genetic analysis, trait improvement and breeding reports.

Core expertise:
- Plant genetics: dominant and recessive traits, heritability, marker-assisted and genomic selection
- Trait categories: agronomic (yield, maturity), quality (protein, grain quality), stress resistance (drought, heat, cold, salinity), disease and pest resistance, adaptability
- Trait interactions: positive correlations, trade-offs, environmental dependencies

Reference data covers six crops (Bread Wheat, Barley, Corn, Sorghum, Durum Wheat, Alfalfa) and three Algerian climate zones (Northern, High Plateau, Sahara). Use the available tools to look up plants, zones, hybridization predictions and detailed reports instead of guessing values.

When producing a breeding report use these sections: Executive Summary, Parent Species Analysis, Trait Compatibility, Hybridization Prediction, Expected F1 Characteristics, Improvement Recommendations, Environmental Adaptability, Risk Assessment, Conclusion.

Style: clear professional language, explain technical terms on first use, give percentages and confidence levels, and state risks alongside opportunities. Hybridization success rates are heuristic estimates, not validated biological predictions."#;

pub mod errors {
    pub const API_ERROR: &str = "I encountered an error processing your request. Please try again.";
    pub const TOOL_ERROR: &str = "I had trouble executing that action. Please try again.";
    pub const RATE_LIMIT: &str = "I'm receiving too many requests. Please wait a moment and try again.";
}

#[derive(Debug, Clone, Serialize)]
pub struct Personality {
    pub name: &'static str,
    pub tone: &'static str,
    pub expertise: &'static str,
    pub response_style: &'static str,
}

pub const PERSONALITY: Personality = Personality {
    name: "Zer3aZ Assistant",
    tone: "professional yet friendly",
    expertise: "plant breeding and agricultural genetics",
    response_style: "informative and practical",
};

#[derive(Debug, Clone, Serialize)]
pub struct PlatformContext {
    pub name: &'static str,
    pub features: &'static [&'static str],
    pub climate_zones: &'static [&'static str],
}

pub const PLATFORM_CONTEXT: PlatformContext = PlatformContext {
    name: "Zer3aZ",
    features: &[
        "Hybridization success prediction",
        "Plant species comparison",
        "Regional compatibility ranking",
        "Interactive map visualization",
        "Trait-based analysis",
    ],
    climate_zones: &[
        "Northern (temperate climate)",
        "High Plateau (continental climate)",
        "Sahara (arid climate)",
    ],
};
