//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `caremate-core`. The insert runs
//! through an ownership subquery so that a write into someone else's
//! session affects zero rows and surfaces as `StoreError::Denied` --
//! the SQL-level equivalent of a row-level security policy.

use caremate_core::chat::repository::MessageRepository;
use caremate_types::chat::{ChatMessage, MessageRole};
use caremate_types::error::StoreError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct ChatMessageRow {
    id: String,
    session_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, StoreError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StoreError::Query(format!("invalid message id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| StoreError::Query(format!("invalid session_id: {e}")))?;
        let role: MessageRole = self.role.parse().map_err(StoreError::Query)?;

        Ok(ChatMessage {
            id,
            session_id,
            role,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl MessageRepository for SqliteMessageRepository {
    async fn append_message(
        &self,
        user_id: &Uuid,
        message: &ChatMessage,
    ) -> Result<(), StoreError> {
        // INSERT ... SELECT guarded by the ownership check: zero rows
        // affected means the parent session is missing or not ours.
        let result = sqlx::query(
            r#"INSERT INTO messages (id, session_id, role, content, created_at)
               SELECT ?, ?, ?, ?, ?
               WHERE EXISTS (SELECT 1 FROM chat_sessions WHERE id = ? AND user_id = ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .bind(message.session_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Denied);
        }

        Ok(())
    }

    async fn list_messages(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT m.id, m.session_id, m.role, m.content, m.created_at
               FROM messages m
               JOIN chat_sessions s ON s.id = m.session_id
               WHERE m.session_id = ? AND s.user_id = ?
               ORDER BY m.created_at ASC"#,
        )
        .bind(session_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                ChatMessageRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn count_messages(&self) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM messages")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}
