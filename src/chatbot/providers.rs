//! Request builders and response parsers for the hosted LLM APIs
//!
//! Pure JSON in, JSON out. The HTTP client in `llm` sends what these build,
//! which keeps the wire shapes testable without a network.
//!
//! - Claude: `POST /v1/messages`
//! - Gemini: `POST /v1beta/models/{model}:generateContent`
//! - OpenAI: `POST /v1/chat/completions`

use crate::chatbot::config::{ChatbotConfig, Provider};
use crate::chatbot::history::{ChatMessage, Role};
use crate::chatbot::tools::ToolDefinition;
use serde_json::{json, Value};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("No API key configured for {0}")]
    MissingApiKey(Provider),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("LLM returned empty response")]
    EmptyResponse,
}

/// A function call requested by the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// Parsed provider reply
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    Text(String),
    /// `raw` is the assistant turn to echo back in the follow-up request
    ToolCalls { calls: Vec<ToolCall>, raw: Value },
}

fn default_base_url(provider: Provider) -> &'static str {
    match provider {
        Provider::Claude => "https://api.anthropic.com",
        Provider::Gemini => "https://generativelanguage.googleapis.com",
        Provider::OpenAi => "https://api.openai.com",
    }
}

/// Request URL; `base_url` replaces the provider's public host
pub fn endpoint(provider: Provider, model: &str, base_url: Option<&str>) -> String {
    let base = base_url
        .unwrap_or_else(|| default_base_url(provider))
        .trim_end_matches('/');
    match provider {
        Provider::Claude => format!("{}/v1/messages", base),
        Provider::Gemini => format!("{}/v1beta/models/{}:generateContent", base, model),
        Provider::OpenAi => format!("{}/v1/chat/completions", base),
    }
}

/// Authentication and version headers
pub fn headers(provider: Provider, api_key: &str) -> Vec<(&'static str, String)> {
    match provider {
        Provider::Claude => vec![
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ],
        Provider::Gemini => vec![("x-goog-api-key", api_key.to_string())],
        Provider::OpenAi => vec![("authorization", format!("Bearer {}", api_key))],
    }
}

/// Build the first request of an exchange
///
/// Tools are only attached for providers with tool-call support here
/// (Claude and OpenAI).
pub fn build_request(
    config: &ChatbotConfig,
    system: &str,
    history: &[ChatMessage],
    message: &str,
    tools: Option<&[ToolDefinition]>,
) -> Value {
    match config.provider {
        Provider::Claude => claude_request(config, system, history, message, tools),
        Provider::Gemini => gemini_request(config, system, history, message),
        Provider::OpenAi => openai_request(config, system, history, message, tools),
    }
}

pub fn parse_response(provider: Provider, body: &Value) -> Result<ProviderReply, LlmError> {
    match provider {
        Provider::Claude => parse_claude(body),
        Provider::Gemini => parse_gemini(body),
        Provider::OpenAi => parse_openai(body),
    }
}

/// Append the assistant tool-call turn and the tool results to a request
///
/// `results` pairs each call with its JSON-encoded output. Tools are removed
/// so the follow-up answers in text.
pub fn build_tool_followup(
    provider: Provider,
    request: &Value,
    raw_assistant: &Value,
    results: &[(ToolCall, String)],
) -> Result<Value, LlmError> {
    let mut next = request.clone();
    let messages = next
        .get_mut("messages")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| LlmError::InvalidResponse("request has no messages array".to_string()))?;

    match provider {
        Provider::Claude => {
            messages.push(json!({"role": "assistant", "content": raw_assistant}));
            let blocks: Vec<Value> = results
                .iter()
                .map(|(call, output)| {
                    json!({"type": "tool_result", "tool_use_id": call.id, "content": output})
                })
                .collect();
            messages.push(json!({"role": "user", "content": blocks}));
        }
        Provider::OpenAi => {
            messages.push(raw_assistant.clone());
            for (call, output) in results {
                messages.push(json!({
                    "role": "tool",
                    "tool_call_id": call.id,
                    "name": call.name,
                    "content": output,
                }));
            }
        }
        Provider::Gemini => {
            return Err(LlmError::InvalidResponse(
                "tool calls are not supported for Gemini".to_string(),
            ))
        }
    }

    if let Some(obj) = next.as_object_mut() {
        obj.remove("tools");
        obj.remove("tool_choice");
    }
    Ok(next)
}

// ============================================================================
// Claude
// ============================================================================

fn claude_request(
    config: &ChatbotConfig,
    system: &str,
    history: &[ChatMessage],
    message: &str,
    tools: Option<&[ToolDefinition]>,
) -> Value {
    // Claude conversations must open with a user turn
    let mut messages: Vec<Value> = history
        .iter()
        .skip_while(|m| m.role == Role::Assistant)
        .map(|m| json!({"role": role_name(m.role), "content": m.content}))
        .collect();
    messages.push(json!({"role": "user", "content": message}));

    let mut body = json!({
        "model": config.model,
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
        "system": system,
        "messages": messages,
    });

    if let Some(tools) = tools.filter(|t| !t.is_empty()) {
        body["tools"] = tools
            .iter()
            .map(|t| json!({"name": t.name, "description": t.description, "input_schema": t.parameters}))
            .collect();
    }
    body
}

fn parse_claude(body: &Value) -> Result<ProviderReply, LlmError> {
    let content = body["content"]
        .as_array()
        .ok_or_else(|| LlmError::InvalidResponse("missing content array".to_string()))?;

    let calls: Vec<ToolCall> = content
        .iter()
        .filter(|block| block["type"] == "tool_use")
        .map(|block| ToolCall {
            id: block["id"].as_str().unwrap_or_default().to_string(),
            name: block["name"].as_str().unwrap_or_default().to_string(),
            arguments: block["input"].clone(),
        })
        .collect();

    if !calls.is_empty() {
        return Ok(ProviderReply::ToolCalls {
            calls,
            raw: Value::Array(content.clone()),
        });
    }

    let text: String = content
        .iter()
        .filter(|block| block["type"] == "text")
        .filter_map(|block| block["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    non_empty(text)
}

// ============================================================================
// Gemini
// ============================================================================

fn gemini_request(
    config: &ChatbotConfig,
    system: &str,
    history: &[ChatMessage],
    message: &str,
) -> Value {
    let mut contents: Vec<Value> = history
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            json!({"role": role, "parts": [{"text": m.content}]})
        })
        .collect();
    contents.push(json!({"role": "user", "parts": [{"text": message}]}));

    json!({
        "systemInstruction": {"parts": [{"text": system}]},
        "contents": contents,
        "generationConfig": {
            "temperature": config.temperature,
            "topP": 0.95,
            "topK": 40,
            "maxOutputTokens": config.max_tokens,
        },
    })
}

fn parse_gemini(body: &Value) -> Result<ProviderReply, LlmError> {
    let parts = body["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| LlmError::InvalidResponse("missing candidates[0].content.parts".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    non_empty(text)
}

// ============================================================================
// OpenAI
// ============================================================================

fn openai_request(
    config: &ChatbotConfig,
    system: &str,
    history: &[ChatMessage],
    message: &str,
    tools: Option<&[ToolDefinition]>,
) -> Value {
    let mut messages = vec![json!({"role": "system", "content": system})];
    messages.extend(
        history
            .iter()
            .map(|m| json!({"role": role_name(m.role), "content": m.content})),
    );
    messages.push(json!({"role": "user", "content": message}));

    let mut body = json!({
        "model": config.model,
        "messages": messages,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
    });

    if let Some(tools) = tools.filter(|t| !t.is_empty()) {
        body["tools"] = tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {"name": t.name, "description": t.description, "parameters": t.parameters}
                })
            })
            .collect();
        body["tool_choice"] = json!("auto");
    }
    body
}

fn parse_openai(body: &Value) -> Result<ProviderReply, LlmError> {
    let message = &body["choices"][0]["message"];
    if message.is_null() {
        return Err(LlmError::InvalidResponse("missing choices[0].message".to_string()));
    }

    if let Some(tool_calls) = message["tool_calls"].as_array().filter(|c| !c.is_empty()) {
        let calls = tool_calls
            .iter()
            .map(|call| {
                let raw_args = call["function"]["arguments"].as_str().unwrap_or("{}");
                let arguments = serde_json::from_str(raw_args).map_err(|e| {
                    LlmError::InvalidResponse(format!("tool arguments are not JSON: {}", e))
                })?;
                Ok(ToolCall {
                    id: call["id"].as_str().unwrap_or_default().to_string(),
                    name: call["function"]["name"].as_str().unwrap_or_default().to_string(),
                    arguments,
                })
            })
            .collect::<Result<Vec<_>, LlmError>>()?;

        return Ok(ProviderReply::ToolCalls {
            calls,
            raw: message.clone(),
        });
    }

    non_empty(message["content"].as_str().unwrap_or_default().to_string())
}

// ============================================================================
// Helpers
// ============================================================================

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn non_empty(text: String) -> Result<ProviderReply, LlmError> {
    if text.trim().is_empty() {
        Err(LlmError::EmptyResponse)
    } else {
        Ok(ProviderReply::Text(text))
    }
}
