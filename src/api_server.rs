// Axum API server for the breeding dashboard and chatbot
//
// Read endpoints are cached in moka; pair ranking runs on the blocking pool.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use moka::future::Cache;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::catalog::{self, RankMetric};
use crate::chatbot::config::{errors, PERSONALITY, PLATFORM_CONTEXT};
use crate::chatbot::{ChatMessage, Chatbot, LlmError, ToolError, DEFAULT_SESSION, GREETING};
use crate::config::ServerConfig;
use crate::data::{BreedingData, ClimateZone};
use crate::explanation::{HtmlFormatter, JsonFormatter, MarkdownFormatter, ReportGenerator};
use crate::scorer::CompatibilityScorer;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<BreedingData>,
    pub scorer: Arc<CompatibilityScorer>,
    pub chatbot: Arc<Chatbot>,
    pub cache: Cache<String, Value>,
}

impl AppState {
    pub async fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading reference data...");
        let data = match &config.data_file {
            Some(path) => BreedingData::load(path)?,
            None => BreedingData::builtin()?,
        };
        tracing::info!("Loaded {} plants, {} zones", data.len(), data.zones().len());

        Self::with_data(data, config)
    }

    /// Build state around an already loaded table
    pub fn with_data(data: BreedingData, config: &ServerConfig) -> anyhow::Result<Self> {
        let data = Arc::new(data);
        let scorer = CompatibilityScorer::new();

        tracing::info!("Initializing chatbot...");
        let chatbot = Chatbot::new(
            config.chatbot.clone(),
            data.clone(),
            scorer.clone(),
            config.cache_ttl,
        )?;

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            data,
            scorer: Arc::new(scorer),
            chatbot: Arc::new(chatbot),
            cache,
        })
    }

    /// Serve from cache or compute, serialize and store
    async fn cached<T, F>(&self, key: String, compute: F) -> Result<Value, AppError>
    where
        T: serde::Serialize,
        F: FnOnce() -> Result<T, AppError>,
    {
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(cached);
        }

        let value = serde_json::to_value(compute()?)
            .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;
        self.cache.insert(key, value.clone()).await;
        Ok(value)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))

        // Catalog
        .route("/api/plants", get(list_plants))
        .route("/api/plants/search", get(search_plants))
        .route("/api/plants/:id", get(get_plant))
        .route("/api/zones", get(list_zones))
        .route("/api/zones/:name", get(get_zone))
        .route("/api/recommendations", get(get_recommendations))

        // Scoring
        .route("/api/predict", post(predict))
        .route("/api/compare", get(compare))
        .route("/api/ranking", get(get_ranking))
        .route("/api/ranking/pairs", get(get_pair_ranking))
        .route("/api/report", post(generate_report))

        // Chatbot
        .route("/api/chat", post(chat))
        .route("/api/reset", post(reset_chat))
        .route("/api/history", get(get_history))
        .route("/api/greeting", get(get_greeting))
        .route("/api/config", get(get_chat_config))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(execute_tool))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Catalog Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "plants": state.data.len(),
        "chat_backend": state.chatbot.backend().label(),
    }))
}

async fn list_plants(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let data = state.data.clone();
    let result = state
        .cached("plants:all".to_string(), || Ok(json!({
            "count": data.len(),
            "plants": data.plants(),
        })))
        .await?;
    Ok(Json(result))
}

async fn search_plants(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let query = params.q.trim().to_lowercase();
    let data = state.data.clone();
    let result = state
        .cached(format!("search:{}", query), || {
            let matches = catalog::search(&data, &query);
            Ok(json!({
                "query": query,
                "count": matches.len(),
                "plants": matches,
            }))
        })
        .await?;
    Ok(Json(result))
}

async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let data = state.data.clone();
    let result = state
        .cached(format!("plant:{}", id), || {
            data.plant(id)
                .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))
        })
        .await?;
    Ok(Json(result))
}

async fn list_zones(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let data = state.data.clone();
    let result = state
        .cached("zones:all".to_string(), || Ok(json!({ "zones": data.zones() })))
        .await?;
    Ok(Json(result))
}

async fn get_zone(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let zone: ClimateZone = name
        .parse()
        .map_err(|e: crate::data::UnknownZone| AppError::NotFound(e.to_string()))?;

    let data = state.data.clone();
    let result = state
        .cached(format!("zone:{}", zone.label()), || {
            Ok(json!({
                "zone": data.zone(zone),
                "climate": zone.climate(),
                "statistics": catalog::zone_statistics(&data, zone),
            }))
        })
        .await?;
    Ok(Json(result))
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> Result<Json<Value>, AppError> {
    let zone = match params.zone.as_deref().filter(|z| !z.trim().is_empty()) {
        Some(raw) => Some(
            raw.parse::<ClimateZone>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
        None => None,
    };
    // Matching is case-insensitive, so the key and the echo use one casing
    let target = params.target_trait.unwrap_or_default().trim().to_lowercase();

    let data = state.data.clone();
    let key = format!("recommendations:{:?}:{}", zone, target);
    let result = state
        .cached(key, || {
            let plants = catalog::recommendations(&data, zone, Some(target.as_str()));
            Ok(json!({
                "zone": zone,
                "trait": target,
                "count": plants.len(),
                "plants": plants,
            }))
        })
        .await?;
    Ok(Json(result))
}

// ============================================================================
// Scoring Handlers
// ============================================================================

async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PairRequest>,
) -> Result<Json<Value>, AppError> {
    let (a_id, b_id) = (payload.plant_a_id, payload.plant_b_id);
    tracing::info!("Predicting hybridization {} × {}", a_id, b_id);

    let data = state.data.clone();
    let scorer = state.scorer.clone();
    let result = state
        .cached(format!("predict:{}:{}", a_id, b_id), || {
            scorer
                .score_ids(&data, a_id, b_id)
                .ok_or_else(|| missing_pair(a_id, b_id))
        })
        .await?;
    Ok(Json(result))
}

async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<Value>, AppError> {
    let data = state.data.clone();
    let scorer = state.scorer.clone();
    let result = state
        .cached(format!("compare:{}:{}", params.a, params.b), || {
            let (a, b) = match (data.plant(params.a), data.plant(params.b)) {
                (Some(a), Some(b)) => (a, b),
                _ => return Err(missing_pair(params.a, params.b)),
            };
            Ok(json!({
                "plant_a": a,
                "plant_b": b,
                "similarity": catalog::trait_similarity(a, b),
                "prediction": scorer.score(&a.profile(), &b.profile()),
            }))
        })
        .await?;
    Ok(Json(result))
}

async fn get_ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingQuery>,
) -> Result<Json<Value>, AppError> {
    let metric: RankMetric = params
        .metric
        .parse()
        .map_err(|e: catalog::UnknownMetric| AppError::BadRequest(e.to_string()))?;

    let data = state.data.clone();
    let result = state
        .cached(format!("ranking:{:?}", metric), || {
            Ok(json!({
                "metric": metric,
                "title": metric.title(),
                "ranking": catalog::rank_by(&data, metric),
            }))
        })
        .await?;
    Ok(Json(result))
}

async fn get_pair_ranking(
    State(state): State<AppState>,
    Query(params): Query<PairRankingQuery>,
) -> Result<Json<Value>, AppError> {
    let cache_key = "ranking:pairs".to_string();

    let all = match state.cache.get(&cache_key).await {
        Some(cached) => cached,
        None => {
            // CPU-bound work: run in blocking thread pool
            let data = state.data.clone();
            let scorer = state.scorer.clone();
            let pairs = tokio::task::spawn_blocking(move || scorer.rank_pairs(&data))
                .await
                .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

            tracing::info!("Ranked {} plant pairs", pairs.len());
            let value = serde_json::to_value(pairs)
                .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;
            state.cache.insert(cache_key, value.clone()).await;
            value
        }
    };

    let pairs: Vec<Value> = match all {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    let total = pairs.len();
    let limit = params.limit.unwrap_or(total);

    Ok(Json(json!({
        "total": total,
        "pairs": pairs.into_iter().take(limit).collect::<Vec<_>>(),
    })))
}

async fn generate_report(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Response, AppError> {
    let (a_id, b_id) = (payload.plant_a_id, payload.plant_b_id);
    let (a, b) = match (state.data.plant(a_id), state.data.plant(b_id)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(missing_pair(a_id, b_id)),
    };

    let score = state.scorer.score(&a.profile(), &b.profile());
    let report = ReportGenerator::generate(a, b, &score);
    tracing::info!("Generated {} report for {} × {}", payload.format, a.common_name, b.common_name);

    match payload.format.to_lowercase().as_str() {
        "json" => {
            let body = JsonFormatter::format(&report)
                .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;
            Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
        "markdown" | "md" => Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            MarkdownFormatter::format(&report),
        )
            .into_response()),
        "html" => Ok(Html(HtmlFormatter::format(&report)).into_response()),
        other => Err(AppError::BadRequest(format!(
            "Unknown report format '{}' (expected json, markdown or html)",
            other
        ))),
    }
}

fn missing_pair(a_id: u32, b_id: u32) -> AppError {
    AppError::NotFound(format!("Plant pair {} × {} not found", a_id, b_id))
}

// ============================================================================
// Chatbot Handlers
// ============================================================================

async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::ChatInput("Message is required".to_string()));
    }

    let session_id = payload.session_id.as_deref().unwrap_or(DEFAULT_SESSION);
    let reply = state
        .chatbot
        .chat(session_id, message, payload.conversation_history)
        .await
        .map_err(AppError::Upstream)?;

    Ok(Json(json!({
        "response": reply.response,
        "success": true,
        "service": reply.service,
        "session_id": reply.session_id,
        "history_length": reply.history_length,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

async fn reset_chat(
    State(state): State<AppState>,
    payload: Option<Json<SessionRequest>>,
) -> impl IntoResponse {
    let session_id = payload
        .and_then(|Json(p)| p.session_id)
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());

    state.chatbot.reset(&session_id).await;
    tracing::info!("Reset chat session {}", session_id);

    Json(json!({
        "success": true,
        "session_id": session_id,
        "message": "Conversation reset",
    }))
}

async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<SessionRequest>,
) -> impl IntoResponse {
    let session_id = params
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());
    let history = state.chatbot.history(&session_id).await;

    Json(json!({
        "session_id": session_id,
        "length": history.len(),
        "history": history,
    }))
}

async fn get_greeting() -> impl IntoResponse {
    Json(json!({ "greeting": GREETING }))
}

async fn get_chat_config(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.chatbot.config();
    Json(json!({
        "greeting": GREETING,
        "personality": PERSONALITY,
        "platform_context": PLATFORM_CONTEXT,
        "backend": state.chatbot.backend().label(),
        "provider": config.provider,
        "model": config.model,
        "enable_tools": config.enable_tools,
        "history_limit": config.history_limit,
    }))
}

async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "tools": state.chatbot.tools().definitions() }))
}

async fn execute_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Option<Json<ToolRequest>>,
) -> Result<Json<Value>, AppError> {
    let parameters = payload.map(|Json(p)| p.parameters).unwrap_or(Value::Null);
    tracing::info!("Executing tool {}", name);

    let result = state
        .chatbot
        .tools()
        .execute(&name, &parameters)
        .map_err(AppError::from)?;

    Ok(Json(json!({
        "tool": name,
        "success": true,
        "result": result,
    })))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(serde::Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(serde::Deserialize)]
struct RecommendationQuery {
    zone: Option<String>,
    #[serde(rename = "trait")]
    target_trait: Option<String>,
}

#[derive(serde::Deserialize)]
struct PairRequest {
    plant_a_id: u32,
    plant_b_id: u32,
}

#[derive(serde::Deserialize)]
struct CompareQuery {
    a: u32,
    b: u32,
}

#[derive(serde::Deserialize)]
struct RankingQuery {
    #[serde(default = "default_metric")]
    metric: String,
}

fn default_metric() -> String {
    "drought".to_string()
}

#[derive(serde::Deserialize)]
struct PairRankingQuery {
    limit: Option<usize>,
}

#[derive(serde::Deserialize)]
struct ReportRequest {
    plant_a_id: u32,
    plant_b_id: u32,
    #[serde(default = "default_report_format")]
    format: String,
}

fn default_report_format() -> String {
    "json".to_string()
}

#[derive(serde::Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    session_id: Option<String>,
    conversation_history: Option<Vec<ChatMessage>>,
}

#[derive(serde::Deserialize)]
struct SessionRequest {
    session_id: Option<String>,
}

#[derive(serde::Deserialize)]
struct ToolRequest {
    #[serde(default)]
    parameters: Value,
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Empty or unusable chat input
    ChatInput(String),
    /// LLM provider failure; the detail is logged, not returned
    Upstream(LlmError),
    Internal(String),
}

impl From<ToolError> for AppError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::UnknownTool(_) | ToolError::NotFound(_) => AppError::NotFound(e.to_string()),
            ToolError::InvalidArguments { .. } => AppError::BadRequest(e.to_string()),
            ToolError::Serialization(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::ChatInput(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "success": false }),
            ),
            AppError::Upstream(e) => {
                tracing::error!("Chat provider error: {}", e);
                let message = match e {
                    LlmError::Status { status: 429, .. } => errors::RATE_LIMIT,
                    _ => errors::API_ERROR,
                };
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": message, "success": false }),
                )
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}
