// Local stand-in for a hosted LLM provider
//
// Serves canned (status, body) replies in order on any path and records
// every request it receives.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::Json,
    Router,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

struct MockState {
    replies: Mutex<VecDeque<(StatusCode, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

pub struct MockProvider {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockProvider {
    pub async fn start(replies: Vec<(StatusCode, Value)>) -> Self {
        Self::spawn(replies, None).await
    }

    /// Every reply is held back for `delay`
    pub async fn start_slow(replies: Vec<(StatusCode, Value)>, delay: Duration) -> Self {
        Self::spawn(replies, Some(delay)).await
    }

    async fn spawn(replies: Vec<(StatusCode, Value)>, delay: Option<Duration>) -> Self {
        let state = Arc::new(MockState {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            delay,
        });

        let app = Router::new().fallback(reply).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn reply(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        headers,
        body,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let next = state.replies.lock().unwrap().pop_front();
    match next {
        Some((status, body)) => (status, Json(body)),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "no reply queued"})),
        ),
    }
}
