//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over the repository traits, but AppState pins them to
//! the concrete SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use caremate_core::auth::AuthEventBus;
use caremate_core::chat::service::ChatService;
use caremate_infra::sqlite::auth::SqliteAuthService;
use caremate_infra::sqlite::message::SqliteMessageRepository;
use caremate_infra::sqlite::pool::{default_database_url, DatabasePool};
use caremate_infra::sqlite::session::SqliteSessionRepository;

/// Concrete type alias for the service generics pinned to the SQLite
/// implementations.
pub type ConcreteChatService = ChatService<SqliteSessionRepository, SqliteMessageRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<SqliteAuthService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub auth_events: AuthEventBus,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Same CAREMATE_DATA_DIR/~/.caremate resolution as resolve_data_dir.
        let db_pool = DatabasePool::new(&default_database_url()).await?;

        let auth_service = SqliteAuthService::new(db_pool.clone());

        let session_repo = SqliteSessionRepository::new(db_pool.clone());
        let message_repo = SqliteMessageRepository::new(db_pool.clone());
        let chat_service = ChatService::new(session_repo, message_repo);

        Ok(Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
            auth_events: AuthEventBus::new(64),
            data_dir,
            db_pool,
        })
    }
}

/// Resolve the data directory from `CAREMATE_DATA_DIR`, falling back to
/// `~/.caremate`.
fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CAREMATE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".caremate")
}
