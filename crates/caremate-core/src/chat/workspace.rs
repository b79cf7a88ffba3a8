//! Per-user view state over the chat service.
//!
//! `ChatWorkspace` mirrors what a connected client sees: the session list
//! (newest activity first), the selected session, and its loaded messages.
//! Store failures never escape the workspace: each one is logged and the
//! affected action silently does not complete, leaving the previous view
//! state in place.

use std::sync::Arc;

use caremate_types::chat::{ChatMessage, ChatSession};
use caremate_types::user::User;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::chat::repository::{MessageRepository, SessionRepository};
use crate::chat::service::ChatService;

/// In-memory view state for one signed-in user.
pub struct ChatWorkspace<S: SessionRepository, M: MessageRepository> {
    service: Arc<ChatService<S, M>>,
    user: User,
    sessions: Vec<ChatSession>,
    current: Option<Uuid>,
    messages: Vec<ChatMessage>,
}

impl<S: SessionRepository, M: MessageRepository> ChatWorkspace<S, M> {
    /// Create an empty workspace for the user. Call `load` to populate it.
    pub fn new(service: Arc<ChatService<S, M>>, user: User) -> Self {
        Self {
            service,
            user,
            sessions: Vec::new(),
            current: None,
            messages: Vec::new(),
        }
    }

    /// The signed-in user this workspace belongs to.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Session list, newest activity first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// The currently selected session, if any.
    pub fn current_session(&self) -> Option<&ChatSession> {
        let id = self.current?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Messages of the selected session, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Fetch the session list and auto-select the most recently updated
    /// session when none is selected yet.
    pub async fn load(&mut self) {
        match self.service.list_sessions(&self.user.id).await {
            Ok(sessions) => self.sessions = sessions,
            Err(e) => {
                warn!(user_id = %self.user.id, error = %e, "failed to load session list");
                return;
            }
        }
        if self.current.is_none()
            && let Some(first) = self.sessions.first()
        {
            self.current = Some(first.id);
            self.reload_messages().await;
        }
    }

    /// Create a session, prepend it to the list, select it, and clear the
    /// message view.
    pub async fn new_chat(&mut self) {
        match self.service.create_session(self.user.id).await {
            Ok(session) => {
                self.current = Some(session.id);
                self.sessions.insert(0, session);
                self.messages.clear();
            }
            Err(e) => {
                warn!(user_id = %self.user.id, error = %e, "failed to create session");
            }
        }
    }

    /// Switch the selection to another of the user's sessions and reload
    /// its messages. Unknown ids are ignored.
    pub async fn select_session(&mut self, session_id: Uuid) {
        if !self.sessions.iter().any(|s| s.id == session_id) {
            warn!(%session_id, "select ignored: session not in list");
            return;
        }
        self.current = Some(session_id);
        self.messages.clear();
        self.reload_messages().await;
    }

    /// Run one exchange against the selected session and refresh the view.
    ///
    /// A no-op when no session is selected, when the input is blank, or
    /// when an exchange is already in flight for the session.
    pub async fn send(&mut self, input: &str) {
        let Some(session_id) = self.current else {
            debug!("send ignored: no session selected");
            return;
        };
        match self
            .service
            .send_message(self.user.id, session_id, input)
            .await
        {
            Ok(messages) => {
                self.messages = messages;
                // The touch changed session recency; refresh the ordering.
                match self.service.list_sessions(&self.user.id).await {
                    Ok(sessions) => self.sessions = sessions,
                    Err(e) => {
                        warn!(user_id = %self.user.id, error = %e, "failed to refresh session list");
                    }
                }
            }
            Err(e) => debug!(%session_id, reason = %e, "send rejected"),
        }
    }

    async fn reload_messages(&mut self) {
        let Some(session_id) = self.current else {
            return;
        };
        match self.service.list_messages(&self.user.id, &session_id).await {
            Ok(messages) => self.messages = messages,
            Err(e) => warn!(%session_id, error = %e, "failed to reload messages"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::MemoryStore;
    use caremate_types::chat::MessageRole;

    async fn workspace() -> (ChatWorkspace<MemoryStore, MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let user = store.add_user("ada@example.com");
        let service = Arc::new(ChatService::new(store.clone(), store.clone()));
        (ChatWorkspace::new(service, user), store)
    }

    #[tokio::test]
    async fn test_load_with_no_sessions_selects_nothing() {
        let (mut ws, _store) = workspace().await;
        ws.load().await;
        assert!(ws.sessions().is_empty());
        assert!(ws.current_session().is_none());
    }

    #[tokio::test]
    async fn test_load_auto_selects_most_recent() {
        let (mut ws, _store) = workspace().await;
        ws.new_chat().await;
        ws.send("hello").await;
        let older = ws.current_session().unwrap().id;
        ws.new_chat().await;
        ws.send("hi again").await;
        let newer = ws.current_session().unwrap().id;

        // A fresh workspace for the same user picks the newest session.
        let service = Arc::new(ChatService::new(_store.clone(), _store.clone()));
        let mut fresh = ChatWorkspace::new(service, ws.user().clone());
        fresh.load().await;
        assert_eq!(fresh.current_session().unwrap().id, newer);
        assert_ne!(newer, older);
        assert_eq!(fresh.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_new_chat_prepends_selects_and_clears() {
        let (mut ws, _store) = workspace().await;
        ws.new_chat().await;
        ws.send("first chat message").await;
        assert_eq!(ws.messages().len(), 2);

        ws.new_chat().await;
        assert_eq!(ws.sessions().len(), 2);
        assert_eq!(ws.current_session().unwrap().id, ws.sessions()[0].id);
        assert!(ws.messages().is_empty());
        assert_eq!(ws.current_session().unwrap().title, "New Chat");
    }

    #[tokio::test]
    async fn test_select_session_reloads_messages() {
        let (mut ws, _store) = workspace().await;
        ws.new_chat().await;
        let first = ws.current_session().unwrap().id;
        ws.send("I have a fever").await;

        ws.new_chat().await;
        assert!(ws.messages().is_empty());

        ws.select_session(first).await;
        assert_eq!(ws.current_session().unwrap().id, first);
        assert_eq!(ws.messages().len(), 2);
        assert_eq!(ws.messages()[0].content, "I have a fever");
    }

    #[tokio::test]
    async fn test_send_without_selection_is_noop() {
        let (mut ws, _store) = workspace().await;
        ws.send("hello?").await;
        assert!(ws.messages().is_empty());
    }

    #[tokio::test]
    async fn test_send_produces_exchange_pair() {
        let (mut ws, _store) = workspace().await;
        ws.new_chat().await;
        ws.send("I have a headache").await;

        let messages = ws.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_send_reorders_sessions_by_recency() {
        let (mut ws, _store) = workspace().await;
        ws.new_chat().await;
        let first = ws.current_session().unwrap().id;
        ws.new_chat().await;
        assert_eq!(ws.sessions()[0].id, ws.current_session().unwrap().id);

        ws.select_session(first).await;
        ws.send("back to the first chat").await;
        assert_eq!(ws.sessions()[0].id, first);
    }

    #[tokio::test]
    async fn test_failed_session_create_keeps_view_intact() {
        let (mut ws, store) = workspace().await;
        ws.new_chat().await;
        let selected = ws.current_session().unwrap().id;

        store.fail_session_creates(true);
        ws.new_chat().await;

        // Failure is swallowed: nothing prepended, selection unchanged.
        assert_eq!(ws.sessions().len(), 1);
        assert_eq!(ws.current_session().unwrap().id, selected);
    }
}
