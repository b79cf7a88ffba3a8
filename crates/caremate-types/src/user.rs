use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-up user of the service.
///
/// Owned by the auth layer; the chat layer only ever reads it to scope
/// session and message queries to the authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record with freshly minted id and timestamps.
    pub fn new(email: String, full_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email,
            full_name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_timestamps_match() {
        let user = User::new("ada@example.com".to_string(), Some("Ada".to_string()));
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_user_serde() {
        let user = User::new("ada@example.com".to_string(), None);
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
