//! AuthService trait definition.
//!
//! The implementation lives in caremate-infra (`SqliteAuthService`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use caremate_types::error::AuthError;
use caremate_types::user::User;

/// A signed-in identity: the user record plus the bearer token that
/// authenticates subsequent requests. The token is returned exactly once,
/// at sign-up/sign-in; only its hash is stored.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Port for session issuance and retrieval.
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token for them.
    ///
    /// Fails with `AuthError::EmailTaken` when the email is registered.
    fn sign_up(
        &self,
        email: &str,
        full_name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<AuthSession, AuthError>> + Send;

    /// Issue a fresh token for an existing user.
    fn sign_in(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<AuthSession, AuthError>> + Send;

    /// Resolve a token to its user, or `None` for an unknown token.
    fn current_user(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, AuthError>> + Send;

    /// Invalidate a token. Unknown tokens are a successful no-op.
    fn sign_out(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;
}
