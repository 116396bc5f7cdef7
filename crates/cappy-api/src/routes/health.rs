use axum::{extract::State, Json};
use cappy_chat::ABOUT_TEXT;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub llm_configured: bool,
    pub model: String,
    pub selector: String,
    pub sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AboutResponse {
    pub text: String,
}

/// Health check endpoint
///
/// Reports whether a language model is configured and which context
/// selector answers queries
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_configured: state.assistant.has_client(),
        model: state.assistant.model().to_string(),
        selector: state.assistant.pipeline().selector().name().to_string(),
        sessions: state.sessions.len().await,
    })
}

pub async fn about() -> Json<AboutResponse> {
    Json(AboutResponse {
        text: ABOUT_TEXT.to_string(),
    })
}
