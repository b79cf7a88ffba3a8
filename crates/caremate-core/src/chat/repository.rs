//! Storage port traits for sessions and messages.
//!
//! Implementations live in caremate-infra (e.g., `SqliteSessionRepository`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Every operation is scoped to the requesting user's id; a session owned
//! by someone else behaves exactly like a session that does not exist.

use caremate_types::chat::{ChatMessage, ChatSession};
use caremate_types::error::StoreError;
use uuid::Uuid;

/// Repository trait for chat session persistence.
pub trait SessionRepository: Send + Sync {
    /// Persist a new session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, StoreError>> + Send;

    /// Get one of the user's sessions by id.
    fn get_session(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, StoreError>> + Send;

    /// List the user's sessions, newest `updated_at` first.
    ///
    /// Returns an empty vec (not an error) when the user owns none.
    fn list_sessions(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, StoreError>> + Send;

    /// Set the session's `updated_at` to the current time.
    fn touch_session(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Replace the session title.
    fn rename_session(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Count sessions across all users.
    fn count_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;
}

/// Repository trait for message persistence.
pub trait MessageRepository: Send + Sync {
    /// Persist one message.
    ///
    /// Fails with `StoreError::Denied` when the parent session is not
    /// owned by `user_id`.
    fn append_message(
        &self,
        user_id: &Uuid,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List messages for one of the user's sessions, oldest first.
    ///
    /// Empty vec for an empty or non-owned session.
    fn list_messages(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;

    /// Count messages across all sessions.
    fn count_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;
}
