//! HTTP endpoints: chat page, health check, chat API.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, error, info_span, warn};
use uuid::Uuid;

use crate::agent::ChatAgent;
use crate::config::ServerConfig;
use crate::llm::ChatMessage;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ChatAgent>,
    /// Environment label echoed by /health.
    pub environment: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,
}

/// Successful `POST /chat` reply.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Build the router: `/`, `/health`, `/chat`, plus static assets.
pub fn app_routes(agent: Arc<ChatAgent>, config: &ServerConfig) -> Router {
    let state = AppState {
        agent,
        environment: config.environment.clone(),
    };

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .with_state(state)
        .merge(static_routes(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn static_routes(static_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.environment,
    }))
}

// ── Chat ────────────────────────────────────────────────────────────────

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected malformed chat request");
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let message = match request.message {
        Some(message) if !message.trim().is_empty() => message,
        _ => return error_response(StatusCode::BAD_REQUEST, "Message is required"),
    };
    let history = request.history.unwrap_or_default();

    let request_id = Uuid::new_v4();
    let span = info_span!("chat", %request_id, history = history.len());
    let agent = Arc::clone(&state.agent);

    // Own task so a panic in the loop maps to a 500 rather than a dropped connection.
    let turn = tokio::spawn(async move { agent.chat(&message, &history).await }.instrument(span));

    match turn.await {
        Ok(response) => Json(ChatResponse { response }).into_response(),
        Err(e) => {
            error!(%request_id, error = %e, "Chat error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
