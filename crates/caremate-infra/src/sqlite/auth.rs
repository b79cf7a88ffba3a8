//! SQLite-backed auth service.
//!
//! Implements `AuthService` from `caremate-core`. Tokens are 32 random
//! bytes rendered as hex with a `cm_` prefix; only the SHA-256 hash is
//! stored, and the plaintext is returned to the caller exactly once.

use caremate_core::auth::{AuthService, AuthSession};
use caremate_types::error::AuthError;
use caremate_types::user::User;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::{Digest, Sha256};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `AuthService`.
pub struct SqliteAuthService {
    pool: DatabasePool,
}

impl SqliteAuthService {
    /// Create a new auth service backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn issue_token(&self, user_id: &Uuid) -> Result<String, AuthError> {
        let mut token_bytes = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut token_bytes)
            .map_err(|e| AuthError::StorageError(format!("rng failure: {e}")))?;
        let token = format!(
            "cm_{}",
            token_bytes
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<String>()
        );

        sqlx::query(
            "INSERT INTO auth_tokens (id, user_id, token_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::now_v7().to_string())
        .bind(user_id.to_string())
        .bind(hash_token(&token))
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| AuthError::StorageError(e.to_string()))?;

        Ok(token)
    }
}

/// Compute SHA-256 hash of a token (lowercase hex).
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: String,
    email: String,
    full_name: Option<String>,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<User, AuthError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| AuthError::StorageError(format!("invalid user id: {e}")))?;
        Ok(User {
            id,
            email: self.email,
            full_name: self.full_name,
            created_at: parse_datetime(&self.created_at)
                .map_err(|e| AuthError::StorageError(e.to_string()))?,
            updated_at: parse_datetime(&self.updated_at)
                .map_err(|e| AuthError::StorageError(e.to_string()))?,
        })
    }
}

impl AuthService for SqliteAuthService {
    async fn sign_up(
        &self,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let existing = sqlx::query("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken(email.to_string()));
        }

        let user = User::new(email.to_string(), full_name.map(str::to_string));
        sqlx::query(
            "INSERT INTO users (id, email, full_name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(format_datetime(&user.created_at))
        .bind(format_datetime(&user.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| AuthError::StorageError(e.to_string()))?;

        let token = self.issue_token(&user.id).await?;
        Ok(AuthSession { user, token })
    }

    async fn sign_in(&self, email: &str) -> Result<AuthSession, AuthError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;

        let user = match row {
            Some(row) => UserRow::from_row(&row)
                .map_err(|e| AuthError::StorageError(e.to_string()))?
                .into_user()?,
            None => return Err(AuthError::UnknownEmail),
        };

        let token = self.issue_token(&user.id).await?;
        Ok(AuthSession { user, token })
    }

    async fn current_user(&self, token: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"SELECT u.id, u.email, u.full_name, u.created_at, u.updated_at, t.id as token_id
               FROM auth_tokens t
               JOIN users u ON u.id = t.user_id
               WHERE t.token_hash = ?"#,
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| AuthError::StorageError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        // Update last_used_at (best effort, don't fail the request)
        let token_id: String = row
            .try_get("token_id")
            .map_err(|e| AuthError::StorageError(e.to_string()))?;
        let _ = sqlx::query("UPDATE auth_tokens SET last_used_at = ? WHERE id = ?")
            .bind(format_datetime(&Utc::now()))
            .bind(&token_id)
            .execute(&self.pool.writer)
            .await;

        let user = UserRow::from_row(&row)
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .into_user()?;
        Ok(Some(user))
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM auth_tokens WHERE token_hash = ?")
            .bind(hash_token(token))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;
        Ok(())
    }
}
