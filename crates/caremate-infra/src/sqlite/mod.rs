//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod auth;
pub mod message;
pub mod pool;
pub mod session;

use caremate_types::error::StoreError;
use chrono::{DateTime, Utc};

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use caremate_core::auth::AuthService;
    use caremate_core::chat::service::ChatService;
    use caremate_core::chat::workspace::ChatWorkspace;
    use caremate_types::chat::MessageRole;

    use super::auth::SqliteAuthService;
    use super::message::SqliteMessageRepository;
    use super::session::tests::test_pool;
    use super::session::SqliteSessionRepository;

    // Full stack over a real database: sign up, open a chat, run one
    // exchange, and read the persisted transcript back through the view.
    #[tokio::test]
    async fn test_sign_in_new_chat_exchange_flow() {
        let pool = test_pool().await;
        let auth = SqliteAuthService::new(pool.clone());

        let signed_up = auth.sign_up("ada@example.com", Some("Ada")).await.unwrap();
        let user = auth
            .current_user(&signed_up.token)
            .await
            .unwrap()
            .expect("token just issued");

        let service = Arc::new(ChatService::new(
            SqliteSessionRepository::new(pool.clone()),
            SqliteMessageRepository::new(pool),
        ));
        let mut workspace = ChatWorkspace::new(service, user);

        workspace.load().await;
        assert!(workspace.current_session().is_none());
        workspace.new_chat().await;
        assert_eq!(workspace.current_session().unwrap().title, "New Chat");

        workspace.send("I have a headache").await;

        let messages = workspace.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "I have a headache");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert!(messages[1].content.contains("headache"));
    }
}
