use thiserror::Error;

/// Errors from session/message store operations.
///
/// `Denied` covers both "row does not exist" and "row is owned by someone
/// else": the store deliberately does not distinguish the two, so a caller
/// can never probe for another user's sessions.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("access denied")]
    Denied,
}

/// Errors from the authentication boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error("unknown email")]
    UnknownEmail,

    #[error("storage error: {0}")]
    StorageError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
        assert_eq!(StoreError::Denied.to_string(), "access denied");
    }

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::EmailTaken("ada@example.com".to_string());
        assert!(err.to_string().contains("ada@example.com"));
    }
}
