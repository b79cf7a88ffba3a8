//! Message exchange HTTP handler.
//!
//! POST /api/v1/sessions/{id}/messages runs the full send flow: persist
//! the user message, select the canned reply, persist it, bump the
//! session. The response body is the reloaded message list, which may
//! reflect a partial exchange when the store rejected one of the writes.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use caremate_core::chat::service::SendError;
use caremate_types::chat::ChatMessage;
use caremate_types::error::StoreError;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::handlers::session::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// POST /api/v1/sessions/{id}/messages - Run one user/assistant exchange.
pub async fn send_message(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(session_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    // The exchange itself never aborts on store failures, so check the
    // session exists up front to give an honest 404 for bad ids.
    state
        .chat_service
        .get_session(&auth.user.id, &sid)
        .await?
        .ok_or(AppError::Store(StoreError::NotFound))?;

    let messages = state
        .chat_service
        .send_message(auth.user.id, sid, &req.content)
        .await
        .map_err(|e| match e {
            SendError::Busy => AppError::Conflict(e.to_string()),
            SendError::EmptyInput => AppError::Validation(e.to_string()),
        })?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(messages, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{session_id}/messages"))
        .with_link("session", &format!("/api/v1/sessions/{session_id}"));

    Ok(Json(resp))
}
