// LlmClient against a local provider stand-in
//
// Run with: cargo test --test llm_client_tests

#![cfg(feature = "api")]

mod common;

use axum::http::StatusCode;
use breeding_assistant::chatbot::config::errors;
use breeding_assistant::chatbot::llm::LlmClient;
use breeding_assistant::chatbot::{ChatbotConfig, LlmError, Provider, ToolRegistry, SYSTEM_PROMPT};
use breeding_assistant::{BreedingData, CompatibilityScorer};
use common::MockProvider;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn client(provider: Provider, mock: &MockProvider) -> LlmClient {
    LlmClient::new(ChatbotConfig {
        provider,
        api_key: Some("test-key".to_string()),
        model: provider.default_model().to_string(),
        base_url: Some(mock.base_url.clone()),
        enable_tools: true,
        timeout_secs: 5,
        ..ChatbotConfig::default()
    })
    .expect("client with key")
}

fn registry() -> ToolRegistry {
    ToolRegistry::new(
        Arc::new(BreedingData::builtin().unwrap()),
        CompatibilityScorer::new(),
    )
}

fn tool_output(message: &Value) -> Value {
    let content = message["content"].as_str().expect("tool output is a string");
    serde_json::from_str(content).expect("tool output is JSON")
}

#[tokio::test]
async fn test_claude_tool_round_trip() {
    let mock = MockProvider::start(vec![
        (
            StatusCode::OK,
            json!({
                "content": [
                    {"type": "text", "text": "Let me check."},
                    {
                        "type": "tool_use",
                        "id": "toolu_1",
                        "name": "predict_hybridization",
                        "input": {"plant_a_id": 1, "plant_b_id": 2}
                    }
                ],
                "stop_reason": "tool_use"
            }),
        ),
        (
            StatusCode::OK,
            json!({"content": [{"type": "text", "text": "Wheat x Barley scores 53."}]}),
        ),
    ])
    .await;

    let registry = registry();
    let reply = client(Provider::Claude, &mock)
        .chat(SYSTEM_PROMPT, &[], "Can wheat cross with barley?", Some(&registry))
        .await
        .unwrap();
    assert_eq!(reply, "Wheat x Barley scores 53.");

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.path == "/v1/messages"));
    assert_eq!(requests[0].header("x-api-key"), "test-key");
    assert!(!requests[0].header("anthropic-version").is_empty());
    assert_eq!(requests[0].body["tools"].as_array().unwrap().len(), 9);

    let followup = &requests[1].body;
    assert!(followup.get("tools").is_none());
    let messages = followup["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"][1]["id"], "toolu_1");

    let result = &messages[2]["content"][0];
    assert_eq!(messages[2]["role"], "user");
    assert_eq!(result["type"], "tool_result");
    assert_eq!(result["tool_use_id"], "toolu_1");
    assert_eq!(tool_output(result)["prediction"]["success_rate"], 53);
}

#[tokio::test]
async fn test_openai_tool_calls_round_trip() {
    let mock = MockProvider::start(vec![
        (
            StatusCode::OK,
            json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "get_zone_statistics",
                                "arguments": "{\"zone\":\"Sahara\"}"
                            }
                        }]
                    }
                }]
            }),
        ),
        (
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": "One plant suits the Sahara."}}]}),
        ),
    ])
    .await;

    let registry = registry();
    let reply = client(Provider::OpenAi, &mock)
        .chat(SYSTEM_PROMPT, &[], "What grows in the Sahara?", Some(&registry))
        .await
        .unwrap();
    assert_eq!(reply, "One plant suits the Sahara.");

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.path == "/v1/chat/completions"));
    assert_eq!(requests[0].header("authorization"), "Bearer test-key");
    assert_eq!(requests[0].body["tool_choice"], "auto");

    let followup = &requests[1].body;
    assert!(followup.get("tools").is_none());
    assert!(followup.get("tool_choice").is_none());

    let messages = followup["messages"].as_array().unwrap();
    // system, user, assistant tool call, tool result
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2]["tool_calls"][0]["id"], "call_1");

    let last = &messages[3];
    assert_eq!(last["role"], "tool");
    assert_eq!(last["tool_call_id"], "call_1");
    assert_eq!(last["name"], "get_zone_statistics");
    assert_eq!(tool_output(last)["plant_count"], 1);
}

#[tokio::test]
async fn test_failed_tool_reports_error_to_model() {
    let mock = MockProvider::start(vec![
        (
            StatusCode::OK,
            json!({
                "content": [{
                    "type": "tool_use",
                    "id": "toolu_9",
                    "name": "water_the_garden",
                    "input": {}
                }]
            }),
        ),
        (
            StatusCode::OK,
            json!({"content": [{"type": "text", "text": "That action is not available."}]}),
        ),
    ])
    .await;

    let registry = registry();
    let reply = client(Provider::Claude, &mock)
        .chat(SYSTEM_PROMPT, &[], "Water my garden", Some(&registry))
        .await
        .unwrap();
    assert_eq!(reply, "That action is not available.");

    let requests = mock.requests();
    let result = &requests[1].body["messages"][2]["content"][0];
    let output = tool_output(result);
    assert_eq!(output["error"], errors::TOOL_ERROR);
    assert!(output["detail"].as_str().unwrap().contains("water_the_garden"));
}

#[tokio::test]
async fn test_gemini_text_reply() {
    let mock = MockProvider::start(vec![(
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "breeder"}]}}]}),
    )])
    .await;

    let reply = client(Provider::Gemini, &mock)
        .chat(SYSTEM_PROMPT, &[], "Hi", None)
        .await
        .unwrap();
    assert_eq!(reply, "Hello breeder");

    let requests = mock.requests();
    assert_eq!(requests[0].path, "/v1beta/models/gemini-1.5-pro:generateContent");
    assert_eq!(requests[0].header("x-goog-api-key"), "test-key");
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    for status in [StatusCode::TOO_MANY_REQUESTS, StatusCode::INTERNAL_SERVER_ERROR] {
        let mock = MockProvider::start(vec![(status, json!({"error": {"message": "nope"}}))]).await;

        let err = client(Provider::Gemini, &mock)
            .chat(SYSTEM_PROMPT, &[], "Hi", None)
            .await
            .unwrap_err();
        match err {
            LlmError::Status { status: code, body } => {
                assert_eq!(code, status.as_u16());
                assert!(body.contains("nope"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let mock = MockProvider::start_slow(
        vec![(StatusCode::OK, json!({"content": [{"type": "text", "text": "late"}]}))],
        Duration::from_secs(3),
    )
    .await;

    let client = LlmClient::new(ChatbotConfig {
        provider: Provider::Claude,
        api_key: Some("test-key".to_string()),
        base_url: Some(mock.base_url.clone()),
        timeout_secs: 1,
        ..ChatbotConfig::default()
    })
    .unwrap();

    let err = client.chat(SYSTEM_PROMPT, &[], "Hi", None).await.unwrap_err();
    assert!(matches!(err, LlmError::Timeout(1)), "got {:?}", err);
}

#[test]
fn test_missing_key_is_rejected() {
    let result = LlmClient::new(ChatbotConfig {
        provider: Provider::OpenAi,
        api_key: None,
        ..ChatbotConfig::default()
    });
    assert!(matches!(result, Err(LlmError::MissingApiKey(Provider::OpenAi))));
}
