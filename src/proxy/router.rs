use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::ConfigStore;
use crate::preferences::PreferenceStore;
use crate::proxy::chat::{parse_reply, ChatReply, ChatRequest};
use crate::proxy::error::ProxyError;
use crate::proxy::health::health;
use crate::proxy::upstream::UpstreamClient;

const ASSISTANT_SPEAKER: &str = "assistant";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: ConfigStore,
    pub preferences: PreferenceStore,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: ConfigStore) -> Result<Self, ProxyError> {
        let snapshot = config.get();
        let preferences = PreferenceStore::new(snapshot.server.preferences_path.clone());
        let upstream = Arc::new(UpstreamClient::new(&snapshot.upstream)?);
        Ok(Self {
            config,
            preferences,
            upstream,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route(
            "/api/preferences",
            get(read_preferences).post(append_preference),
        )
        .route("/api/chat", post(chat));

    if let Some(dir) = state.config.get().server.static_dir.clone() {
        tracing::info!(dir = %dir.display(), "Serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}

#[derive(Debug, Serialize)]
struct PreferencesBody {
    content: String,
}

#[derive(Debug, Serialize)]
struct AppendedBody {
    ok: bool,
}

/// Bodies are parsed by hand so malformed JSON gets the same error shape
/// as a missing field.
fn parse_body(body: &Bytes) -> Result<Value, ProxyError> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| ProxyError::InvalidRequest(format!("body is not valid JSON: {}", e)))
}

async fn read_preferences(
    State(state): State<AppState>,
) -> Result<Json<PreferencesBody>, ProxyError> {
    let content = state.preferences.read().await?;
    Ok(Json(PreferencesBody { content }))
}

async fn append_preference(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AppendedBody>, ProxyError> {
    let body = parse_body(&body)?;

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ProxyError::InvalidRequest("message is required".to_string()))?;

    let speaker = match body.get("speaker") {
        None | Some(Value::Null) => None,
        Some(Value::String(speaker)) => Some(speaker.as_str()),
        Some(_) => {
            return Err(ProxyError::InvalidRequest(
                "speaker must be a string".to_string(),
            ))
        }
    };

    state.preferences.append(speaker, message).await?;
    Ok(Json(AppendedBody { ok: true }))
}

async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatReply>, ProxyError> {
    let request = ChatRequest::from_json(&parse_body(&body)?)?;
    let upstream_config = state.config.upstream();

    let response = state
        .upstream
        .send_messages(&upstream_config, &request.upstream_body(&upstream_config))
        .await?;
    let reply = parse_reply(&response)?;

    for preference in &reply.preferences {
        if let Err(err) = state
            .preferences
            .append(Some(ASSISTANT_SPEAKER), preference)
            .await
        {
            tracing::warn!(error = %err, "Failed to record chat preference");
        }
    }

    tracing::info!(
        turns = request.messages.len(),
        preferences = reply.preferences.len(),
        "Chat turn completed"
    );
    Ok(Json(reply))
}
