//! Auth HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/auth/signup  - Register and receive a token (no auth)
//! - POST /api/v1/auth/signin  - Issue a fresh token (no auth)
//! - POST /api/v1/auth/signout - Invalidate the presented token

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use caremate_core::auth::{AuthEvent, AuthService, AuthSession};
use caremate_types::user::User;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

/// The one place the plaintext token crosses the wire.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user,
            token: session.token,
        }
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation(format!("Invalid email: '{email}'")));
    }
    Ok(())
}

/// POST /api/v1/auth/signup - Register a new user.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    validate_email(&req.email)?;

    let session = state
        .auth_service
        .sign_up(req.email.trim(), req.full_name.as_deref())
        .await?;

    state.auth_events.publish(AuthEvent::SignedIn {
        user: session.user.clone(),
    });

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(AuthResponse::from(session), request_id, elapsed)
        .with_link("sessions", "/api/v1/sessions");

    Ok(Json(resp))
}

/// POST /api/v1/auth/signin - Issue a fresh token for an existing user.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    validate_email(&req.email)?;

    let session = state.auth_service.sign_in(req.email.trim()).await?;

    state.auth_events.publish(AuthEvent::SignedIn {
        user: session.user.clone(),
    });

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(AuthResponse::from(session), request_id, elapsed)
        .with_link("sessions", "/api/v1/sessions");

    Ok(Json(resp))
}

/// POST /api/v1/auth/signout - Invalidate the presented token.
pub async fn sign_out(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.auth_service.sign_out(&auth.token).await?;

    state.auth_events.publish(AuthEvent::SignedOut {
        user_id: auth.user.id,
    });

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(serde_json::json!({"signed_out": true}), request_id, elapsed);

    Ok(Json(resp))
}
