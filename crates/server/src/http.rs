//! HTTP endpoints
//!
//! REST API for the lead agent: the chat pipeline, health, and the
//! redacted per-tenant config view.

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use lead_agent_agent::MessageProcessor;
use lead_agent_core::ChatMessage;

use crate::state::AppState;
use crate::ServerError;

/// Static feature list advertised by the health endpoint
const FEATURES: &[&str] = &[
    "Lead Scoring",
    "Intent Detection",
    "Enhanced Processing",
    "Session Management",
];

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .route("/health", get(health))
        .route("/clients/:client_id/config", get(client_config))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins
///
/// Disabled CORS means a permissive layer; enabled with no (or only
/// invalid) origins defaults to localhost:3000.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin, "invalid CORS origin");
                None
            })
        })
        .collect();

    let allowed = if parsed.is_empty() {
        tracing::info!("no CORS origins configured, defaulting to localhost:3000");
        vec!["http://localhost:3000".parse::<HeaderValue>().unwrap()]
    } else {
        parsed
    };

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Chat request body
#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
    #[serde(alias = "clientId")]
    client_id: Option<String>,
    #[serde(alias = "sessionId", alias = "conversationId")]
    session_id: Option<String>,
}

/// Chat response envelope
#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    session_id: String,
    lead_score: u8,
    intent: String,
    confidence: f32,
    #[serde(rename = "aiData")]
    ai_data: AiData,
}

#[derive(Debug, Serialize)]
struct AiData {
    lead_score: u8,
    intent: String,
    confidence: f32,
    reasoning: String,
}

/// Chat endpoint: one conversation turn
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    // Validate before touching any session state.
    let message = match request.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            return Err(ServerError::InvalidRequest(
                "Missing required field: message".to_string(),
            ));
        }
    };

    let client_id = request.client_id.unwrap_or_else(|| "default".to_string());
    let session_id = request
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let config = state.registry.get(&client_id);
    let handle = state.sessions.get_or_create(&session_id, &client_id);

    // Hold the session lock for the whole turn; concurrent turns on the
    // same session id serialize here. The store's map lock is not held.
    let mut session = handle.lock().await;
    session.push_message(ChatMessage::user(&message));

    let outcome = match state.processor.process(&message, &mut session, config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                client_id = %config.client_id,
                session_id = %session_id,
                error = %e,
                "message processing failed, substituting fallback"
            );
            MessageProcessor::fallback_outcome(config)
        }
    };

    session.push_message(ChatMessage::bot(&outcome.response));

    Ok(Json(ChatResponse {
        response: outcome.response,
        session_id,
        lead_score: outcome.lead_score,
        intent: outcome.intent.clone(),
        confidence: outcome.confidence,
        ai_data: AiData {
            lead_score: outcome.lead_score,
            intent: outcome.intent,
            confidence: outcome.confidence,
            reasoning: outcome.reasoning,
        },
    }))
}

/// Health check
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "lead-agent",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "available_clients": state.registry.ids(),
        "active_sessions": state.sessions.count(),
        "features": FEATURES,
    }))
}

/// Redacted tenant configuration view
async fn client_config(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Json<serde_json::Value> {
    let mut redacted = state.registry.get(&client_id).redacted();
    // Echo the requested id even when it resolved to the default profile.
    redacted.client_id = client_id;
    Json(serde_json::json!(redacted))
}

/// Service banner
async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Lead agent is running!",
        "available_endpoints": ["/chat", "/health", "/clients/{client_id}/config"],
        "available_clients": state.registry.ids(),
        "features": FEATURES,
    }))
}

/// Unknown routes
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}
