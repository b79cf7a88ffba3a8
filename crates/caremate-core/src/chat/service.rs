//! Chat service running the send/reply exchange over the storage ports.
//!
//! ChatService coordinates the session and message repositories and the
//! response selector. Store failures inside an exchange are logged and the
//! sequence continues; a partial exchange (user row saved, assistant row
//! rejected) is an accepted observable end state, and the final reload
//! reflects whatever actually reached the store.

use caremate_types::chat::{ChatMessage, ChatSession, MessageRole};
use caremate_types::error::StoreError;
use dashmap::DashMap;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::chat::repository::{MessageRepository, SessionRepository};
use crate::responder::select_response;

/// Precondition failures for `send_message`.
///
/// These are the only errors `send_message` surfaces; store failures
/// inside an accepted exchange are logged and swallowed.
#[derive(Debug, Error)]
pub enum SendError {
    /// An exchange is already in flight for this session.
    #[error("an exchange is already in flight for this session")]
    Busy,

    /// The input was blank after trimming.
    #[error("message content is empty")]
    EmptyInput,
}

/// Orchestrates session lifecycle and message exchanges.
///
/// Generic over the repository traits to keep this crate free of any
/// database dependency. The per-session in-flight guard lives here, keyed
/// by session id, so concurrent sends to different sessions are allowed
/// while a second send to the same session is rejected.
pub struct ChatService<S: SessionRepository, M: MessageRepository> {
    sessions: S,
    messages: M,
    in_flight: DashMap<Uuid, ()>,
}

/// Removes the in-flight marker when the exchange ends, on any path.
struct ExchangeGuard<'a> {
    in_flight: &'a DashMap<Uuid, ()>,
    session_id: Uuid,
}

impl Drop for ExchangeGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.session_id);
    }
}

impl<S: SessionRepository, M: MessageRepository> ChatService<S, M> {
    /// Create a new chat service over the given repositories.
    pub fn new(sessions: S, messages: M) -> Self {
        Self {
            sessions,
            messages,
            in_flight: DashMap::new(),
        }
    }

    /// Access the session repository.
    pub fn session_repo(&self) -> &S {
        &self.sessions
    }

    /// Access the message repository.
    pub fn message_repo(&self) -> &M {
        &self.messages
    }

    // --- Session lifecycle ---

    /// Create a new session for the user, titled "New Chat".
    pub async fn create_session(&self, user_id: Uuid) -> Result<ChatSession, StoreError> {
        let session = ChatSession::new(user_id);
        self.sessions.create_session(&session).await
    }

    /// Get one of the user's sessions by id.
    pub async fn get_session(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, StoreError> {
        self.sessions.get_session(user_id, session_id).await
    }

    /// List the user's sessions, most recently updated first.
    pub async fn list_sessions(&self, user_id: &Uuid) -> Result<Vec<ChatSession>, StoreError> {
        self.sessions.list_sessions(user_id).await
    }

    /// List messages for one of the user's sessions, oldest first.
    pub async fn list_messages(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        self.messages.list_messages(user_id, session_id).await
    }

    /// Whether an exchange is currently in flight for the session.
    pub fn is_busy(&self, session_id: &Uuid) -> bool {
        self.in_flight.contains_key(session_id)
    }

    // --- The exchange ---

    /// Run one user/assistant exchange against a session.
    ///
    /// Sequence: trim the input, append the `user` message, reload, select
    /// the canned reply, append the `assistant` message, reload, bump the
    /// session's `updated_at`. Each store failure is logged and the
    /// sequence continues without rollback. Returns the most recent
    /// successful reload of the session's messages.
    ///
    /// Rejects with `SendError::Busy` while another exchange is in flight
    /// for the same session, and `SendError::EmptyInput` for blank input.
    pub async fn send_message(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: &str,
    ) -> Result<Vec<ChatMessage>, SendError> {
        let content = input.trim();
        if content.is_empty() {
            return Err(SendError::EmptyInput);
        }

        if self.in_flight.insert(session_id, ()).is_some() {
            return Err(SendError::Busy);
        }
        let _guard = ExchangeGuard {
            in_flight: &self.in_flight,
            session_id,
        };

        let mut messages = Vec::new();

        let user_message = ChatMessage::new(session_id, MessageRole::User, content.to_string());
        if let Err(e) = self.messages.append_message(&user_id, &user_message).await {
            warn!(%session_id, error = %e, "failed to persist user message");
        }

        // Re-fetch rather than optimistically appending locally: only a
        // reload tells us what actually reached the store.
        match self.messages.list_messages(&user_id, &session_id).await {
            Ok(m) => messages = m,
            Err(e) => warn!(%session_id, error = %e, "failed to reload messages after user turn"),
        }

        let reply = select_response(content);
        let assistant_message =
            ChatMessage::new(session_id, MessageRole::Assistant, reply.to_string());
        if let Err(e) = self
            .messages
            .append_message(&user_id, &assistant_message)
            .await
        {
            warn!(%session_id, error = %e, "failed to persist assistant message");
        }

        match self.messages.list_messages(&user_id, &session_id).await {
            Ok(m) => messages = m,
            Err(e) => {
                warn!(%session_id, error = %e, "failed to reload messages after assistant turn");
            }
        }

        if let Err(e) = self.sessions.touch_session(&user_id, &session_id).await {
            warn!(%session_id, error = %e, "failed to bump session recency");
        }

        Ok(messages)
    }
}
