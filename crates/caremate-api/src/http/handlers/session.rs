//! Session HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/sessions               - List the caller's sessions
//! - POST /api/v1/sessions               - Create a session
//! - GET  /api/v1/sessions/{id}          - Get a single session
//! - PUT  /api/v1/sessions/{id}          - Rename a session
//! - GET  /api/v1/sessions/{id}/messages - Get messages for a session
//!
//! All lookups are scoped to the authenticated user; another user's
//! session id yields the same 404 as a nonexistent one.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use caremate_core::chat::repository::SessionRepository;
use caremate_types::chat::{ChatMessage, ChatSession};
use caremate_types::error::StoreError;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /api/v1/sessions - List the caller's sessions, newest activity first.
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<ApiResponse<Vec<ChatSession>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sessions = state.chat_service.list_sessions(&auth.user.id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(sessions, request_id, elapsed)
        .with_link("self", "/api/v1/sessions");

    Ok(Json(resp))
}

/// POST /api/v1/sessions - Create a session titled "New Chat".
pub async fn create_session(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = state.chat_service.create_session(auth.user.id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let self_link = format!("/api/v1/sessions/{}", session.id);
    let messages_link = format!("/api/v1/sessions/{}/messages", session.id);
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &self_link)
        .with_link("messages", &messages_link);

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id} - Get one of the caller's sessions.
pub async fn get_session(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let session = state
        .chat_service
        .get_session(&auth.user.id, &sid)
        .await?
        .ok_or(AppError::Store(StoreError::NotFound))?;

    let elapsed = start.elapsed().as_millis() as u64;
    let messages_link = format!("/api/v1/sessions/{}/messages", session.id);
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{session_id}"))
        .with_link("messages", &messages_link);

    Ok(Json(resp))
}

#[derive(Debug, Deserialize)]
pub struct RenameSessionRequest {
    pub title: String,
}

/// PUT /api/v1/sessions/{id} - Rename one of the caller's sessions.
pub async fn rename_session(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(session_id): Path<String>,
    Json(req): Json<RenameSessionRequest>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title must not be blank".to_string()));
    }

    state
        .chat_service
        .session_repo()
        .rename_session(&auth.user.id, &sid, title)
        .await?;

    let session = state
        .chat_service
        .get_session(&auth.user.id, &sid)
        .await?
        .ok_or(AppError::Store(StoreError::NotFound))?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{session_id}"));

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id}/messages - Get messages, oldest first.
pub async fn get_messages(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let messages = state.chat_service.list_messages(&auth.user.id, &sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(messages, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{session_id}/messages"))
        .with_link("session", &format!("/api/v1/sessions/{session_id}"));

    Ok(Json(resp))
}
