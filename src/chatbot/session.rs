//! Chat sessions and backend dispatch
//!
//! One `Conversation` per session id, stored in a moka cache with an idle
//! TTL. Messages go to the LLM client when a key is configured and to the
//! keyword responder otherwise.

use crate::chatbot::config::{Backend, ChatbotConfig, SYSTEM_PROMPT};
use crate::chatbot::history::{ChatMessage, Conversation};
use crate::chatbot::llm::LlmClient;
use crate::chatbot::providers::LlmError;
use crate::chatbot::responder;
use crate::chatbot::tools::ToolRegistry;
use crate::data::BreedingData;
use crate::scorer::CompatibilityScorer;
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_SESSION: &str = "default";

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub service: &'static str,
    pub session_id: String,
    pub history_length: usize,
}

/// Chat orchestrator: session store plus backend dispatch
///
/// Sessions expire after the idle TTL. Each session is locked for the whole
/// exchange so concurrent requests on one session apply in order.
pub struct Chatbot {
    config: ChatbotConfig,
    data: Arc<BreedingData>,
    tools: ToolRegistry,
    llm: Option<LlmClient>,
    sessions: Cache<String, Arc<Mutex<Conversation>>>,
}

impl Chatbot {
    pub fn new(
        config: ChatbotConfig,
        data: Arc<BreedingData>,
        scorer: CompatibilityScorer,
        session_ttl: Duration,
    ) -> anyhow::Result<Self> {
        let llm = match config.backend() {
            Backend::Llm(provider) => {
                tracing::info!("Chatbot using {} ({})", provider, config.model);
                Some(LlmClient::new(config.clone())?)
            }
            Backend::Keyword => {
                tracing::info!("No provider API key configured, using keyword responder");
                None
            }
        };

        let sessions = Cache::builder()
            .max_capacity(10_000)
            .time_to_idle(session_ttl)
            .build();

        Ok(Self {
            tools: ToolRegistry::new(data.clone(), scorer),
            config,
            data,
            llm,
            sessions,
        })
    }

    pub fn config(&self) -> &ChatbotConfig {
        &self.config
    }

    pub fn backend(&self) -> Backend {
        match self.llm {
            Some(_) => self.config.backend(),
            None => Backend::Keyword,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    async fn session(&self, session_id: &str) -> Arc<Mutex<Conversation>> {
        let limit = self.config.history_limit;
        self.sessions
            .get_with(session_id.to_string(), async move {
                Arc::new(Mutex::new(Conversation::new(limit)))
            })
            .await
    }

    /// Answer one message; `history` from the client replaces the stored one
    pub async fn chat(
        &self,
        session_id: &str,
        message: &str,
        history: Option<Vec<ChatMessage>>,
    ) -> Result<ChatReply, LlmError> {
        let session = self.session(session_id).await;
        let mut conversation = session.lock().await;

        if let Some(history) = history {
            conversation.replace(history);
        }

        let response = match &self.llm {
            Some(client) => {
                let tools = self.config.enable_tools.then_some(&self.tools);
                client
                    .chat(SYSTEM_PROMPT, conversation.messages(), message, tools)
                    .await
                    .map_err(|e| {
                        tracing::error!("{} request failed: {}", self.config.provider, e);
                        e
                    })?
            }
            None => responder::answer(&self.data, message),
        };

        conversation.record_exchange(message, &response);
        tracing::debug!(
            "Session {} now holds {} messages",
            session_id,
            conversation.len()
        );

        Ok(ChatReply {
            response,
            service: self.backend().label(),
            session_id: session_id.to_string(),
            history_length: conversation.len(),
        })
    }

    pub async fn reset(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }

    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        match self.sessions.get(session_id).await {
            Some(session) => session.lock().await.messages().to_vec(),
            None => Vec::new(),
        }
    }
}
