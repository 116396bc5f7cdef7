use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cappy_chat::{ChatMessage, ReplyKind, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub role: cappy_chat::Role,
    pub content: String,
    /// Chat-window rendering, e.g. "👤 **You:** hi"
    pub display: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub reply: MessageResponse,
    pub kind: ReplyKind,
    pub duration_ms: u64,
    pub session: SessionResponse,
}

/// Create a new session seeded with the greeting
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.sessions.create().await;
    tracing::info!(session_id = %session.id, "Session created");

    (StatusCode::CREATED, Json(session_to_response(&session)))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.sessions.get(parse_id(&session_id)?).await?;
    Ok(Json(session_to_response(&session)))
}

/// Send a user message and return the assistant's reply.
///
/// The session stays locked for the whole turn, so a second message, a clear
/// or a reset on the same session waits for the reply instead of racing it.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<SendMessageResponse>> {
    let id = parse_id(&session_id)?;
    let mut session = state.sessions.lock(id).await?;

    let reply = state.assistant.respond(&mut session, &req.content).await?;

    // deleted while the model was answering
    if !state.sessions.contains(id).await {
        return Err(ApiError::SessionNotFound(id.to_string()));
    }

    Ok(Json(SendMessageResponse {
        reply: message_to_response(&reply.message),
        kind: reply.kind,
        duration_ms: reply.duration_ms,
        session: session_to_response(&session),
    }))
}

/// Reset the transcript to the opening greeting
pub async fn clear_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state
        .sessions
        .update(parse_id(&session_id)?, Session::clear)
        .await?;
    Ok(Json(session_to_response(&session)))
}

/// Start over with the "new chat" greeting
pub async fn new_chat(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state
        .sessions
        .update(parse_id(&session_id)?, Session::new_chat)
        .await?;
    Ok(Json(session_to_response(&session)))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&session_id)?;
    state.sessions.remove(id).await?;
    tracing::info!(session_id = %id, "Session deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(session_id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(session_id)
        .map_err(|_| ApiError::BadRequest("Invalid session ID format".to_string()))
}

fn message_to_response(message: &ChatMessage) -> MessageResponse {
    MessageResponse {
        role: message.role,
        content: message.content.clone(),
        display: message.display(),
        created_at: message.created_at,
    }
}

fn session_to_response(session: &Session) -> SessionResponse {
    SessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        messages: session.messages().iter().map(message_to_response).collect(),
    }
}
