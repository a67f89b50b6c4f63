//! Breeding assistant chatbot
//!
//! Two answering paths share one tool registry:
//! - a hosted LLM (Claude, Gemini or OpenAI) when an API key is configured
//! - the offline keyword responder otherwise
//!
//! Wire formats and the keyword logic are plain functions; the HTTP client
//! and the session store need the `api` feature.

pub mod config;
pub mod keywords;
pub mod responder;
pub mod tools;
pub mod history;
pub mod providers;

#[cfg(feature = "api")]
pub mod llm;

#[cfg(feature = "api")]
pub mod session;

pub use config::{Backend, ChatbotConfig, Provider, GREETING, SYSTEM_PROMPT};
pub use history::{ChatMessage, Conversation, Role};
pub use keywords::{extract_keywords, Keywords, QuestionType, TraitKeyword};
pub use providers::{LlmError, ProviderReply, ToolCall};
pub use responder::answer;
pub use tools::{ToolDefinition, ToolError, ToolRegistry};

#[cfg(feature = "api")]
pub use session::{ChatReply, Chatbot, DEFAULT_SESSION};
