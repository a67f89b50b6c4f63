//! Outbound HTTP client for the configured LLM provider
//!
//! Wire shapes live in `providers`; this module sends them, maps transport
//! failures to `LlmError` and runs at most one round of tool calls.

use crate::chatbot::config::{errors, ChatbotConfig};
use crate::chatbot::history::ChatMessage;
use crate::chatbot::providers::{
    build_request, build_tool_followup, endpoint, headers, parse_response, LlmError, ProviderReply,
};
use crate::chatbot::tools::ToolRegistry;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP client for the configured provider
pub struct LlmClient {
    config: ChatbotConfig,
    api_key: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: ChatbotConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(LlmError::MissingApiKey(config.provider))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            http,
        })
    }

    /// Send one user message with prior history
    ///
    /// With `tools`, a tool-call reply is executed once through the registry
    /// and the final text comes from a second request.
    pub async fn chat(
        &self,
        system: &str,
        history: &[ChatMessage],
        message: &str,
        tools: Option<&ToolRegistry>,
    ) -> Result<String, LlmError> {
        let provider = self.config.provider;
        let definitions = tools.map(ToolRegistry::definitions);
        let request = build_request(&self.config, system, history, message, definitions.as_deref());

        let reply = parse_response(provider, &self.post(&request).await?)?;
        let (calls, raw) = match reply {
            ProviderReply::Text(text) => return Ok(text),
            ProviderReply::ToolCalls { calls, raw } => (calls, raw),
        };

        let registry = tools.ok_or_else(|| {
            LlmError::InvalidResponse("model requested tools that were not offered".to_string())
        })?;

        let results: Vec<_> = calls
            .into_iter()
            .map(|call| {
                tracing::info!("{} requested tool {}", provider, call.name);
                let output = match registry.execute(&call.name, &call.arguments) {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!("Tool {} failed: {}", call.name, e);
                        json!({"error": errors::TOOL_ERROR, "detail": e.to_string()})
                    }
                };
                (call, output.to_string())
            })
            .collect();

        let followup = build_tool_followup(provider, &request, &raw, &results)?;
        match parse_response(provider, &self.post(&followup).await?)? {
            ProviderReply::Text(text) => Ok(text),
            ProviderReply::ToolCalls { .. } => Err(LlmError::InvalidResponse(
                "model requested tools again after tool results".to_string(),
            )),
        }
    }

    async fn post(&self, body: &Value) -> Result<Value, LlmError> {
        let url = endpoint(
            self.config.provider,
            &self.config.model,
            self.config.base_url.as_deref(),
        );
        let mut request = self.http.post(&url).json(body);
        for (name, value) in headers(self.config.provider, &self.api_key) {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response JSON: {}", e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.config.timeout_secs)
        } else {
            LlmError::Http(e.to_string())
        }
    }
}
