//! In-memory repository doubles for orchestration tests.
//!
//! `MemoryStore` implements both storage ports over plain vectors, with
//! toggles to simulate store-side rejections (e.g., an authorization
//! policy denying the assistant insert). Clones share state, mirroring
//! the pool-cloned SQLite repositories in caremate-infra.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use caremate_types::chat::{ChatMessage, ChatSession, MessageRole};
use caremate_types::error::StoreError;
use caremate_types::user::User;
use chrono::Utc;
use uuid::Uuid;

use crate::chat::repository::{MessageRepository, SessionRepository};

#[derive(Default)]
struct Inner {
    users: Mutex<Vec<User>>,
    sessions: Mutex<Vec<ChatSession>>,
    messages: Mutex<Vec<ChatMessage>>,
    deny_assistant_appends: AtomicBool,
    fail_session_creates: AtomicBool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, email: &str) -> User {
        let user = User::new(email.to_string(), None);
        self.inner.users.lock().unwrap().push(user.clone());
        user
    }

    /// Simulate the store rejecting assistant-role inserts.
    pub fn deny_assistant_appends(&self, deny: bool) {
        self.inner
            .deny_assistant_appends
            .store(deny, Ordering::SeqCst);
    }

    /// Simulate the store rejecting session creation.
    pub fn fail_session_creates(&self, fail: bool) {
        self.inner.fail_session_creates.store(fail, Ordering::SeqCst);
    }

    fn owns_session(&self, user_id: &Uuid, session_id: &Uuid) -> bool {
        self.inner
            .sessions
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.id == *session_id && s.user_id == *user_id)
    }
}

impl SessionRepository for MemoryStore {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, StoreError> {
        if self.inner.fail_session_creates.load(Ordering::SeqCst) {
            return Err(StoreError::Denied);
        }
        self.inner.sessions.lock().unwrap().push(session.clone());
        Ok(session.clone())
    }

    async fn get_session(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, StoreError> {
        Ok(self
            .inner
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *session_id && s.user_id == *user_id)
            .cloned())
    }

    async fn list_sessions(&self, user_id: &Uuid) -> Result<Vec<ChatSession>, StoreError> {
        let mut sessions: Vec<ChatSession> = self
            .inner
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn touch_session(&self, user_id: &Uuid, session_id: &Uuid) -> Result<(), StoreError> {
        let mut sessions = self.inner.sessions.lock().unwrap();
        match sessions
            .iter_mut()
            .find(|s| s.id == *session_id && s.user_id == *user_id)
        {
            Some(session) => {
                session.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::Denied),
        }
    }

    async fn rename_session(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
        title: &str,
    ) -> Result<(), StoreError> {
        let mut sessions = self.inner.sessions.lock().unwrap();
        match sessions
            .iter_mut()
            .find(|s| s.id == *session_id && s.user_id == *user_id)
        {
            Some(session) => {
                session.title = title.to_string();
                session.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::Denied),
        }
    }

    async fn count_sessions(&self) -> Result<u64, StoreError> {
        Ok(self.inner.sessions.lock().unwrap().len() as u64)
    }
}

impl MessageRepository for MemoryStore {
    async fn append_message(
        &self,
        user_id: &Uuid,
        message: &ChatMessage,
    ) -> Result<(), StoreError> {
        if message.role == MessageRole::Assistant
            && self.inner.deny_assistant_appends.load(Ordering::SeqCst)
        {
            return Err(StoreError::Denied);
        }
        if !self.owns_session(user_id, &message.session_id) {
            return Err(StoreError::Denied);
        }
        self.inner.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn list_messages(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        if !self.owns_session(user_id, session_id) {
            return Ok(Vec::new());
        }
        let mut messages: Vec<ChatMessage> = self
            .inner
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.session_id == *session_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn count_messages(&self) -> Result<u64, StoreError> {
        Ok(self.inner.messages.lock().unwrap().len() as u64)
    }
}
