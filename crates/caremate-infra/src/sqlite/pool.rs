//! Split read/write SQLite pool.
//!
//! SQLite serializes writers, so routing every statement through one pool
//! wastes the concurrency WAL mode gives readers. `DatabasePool` keeps a
//! single-connection writer for mutations and a wider read-only pool for
//! queries; repositories pick the side that matches the statement.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const READER_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader/writer pool pair over one SQLite database.
#[derive(Clone)]
pub struct DatabasePool {
    /// Read-only pool for SELECTs, up to [`READER_CONNECTIONS`] connections.
    pub reader: SqlitePool,
    /// Single connection for INSERT/UPDATE/DELETE.
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open both pools against `database_url` and run pending migrations.
    ///
    /// WAL journal mode, foreign keys, and the busy timeout are applied to
    /// both sides. Migrations run on the writer before the reader opens.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        Ok(Self { reader, writer })
    }
}

/// Default database URL: `CAREMATE_DATA_DIR` if set, else `~/.caremate`.
pub fn default_database_url() -> String {
    let data_dir = std::env::var("CAREMATE_DATA_DIR").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{home}/.caremate")
    });
    format!("sqlite://{data_dir}/caremate.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_pool(name: &str) -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join(name).display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    #[tokio::test]
    async fn test_migrations_create_schema() {
        let (_dir, pool) = open_pool("schema.db").await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        for expected in ["users", "chat_sessions", "messages", "auth_tokens"] {
            assert!(names.contains(&expected), "{expected} table missing");
        }
    }

    #[tokio::test]
    async fn test_wal_mode_enabled() {
        let (_dir, pool) = open_pool("wal.db").await;

        let mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        assert_eq!(mode.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let (_dir, pool) = open_pool("fk.db").await;

        let fk: (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        assert_eq!(fk.0, 1);
    }

    #[tokio::test]
    async fn test_default_database_url_shape() {
        let url = default_database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("caremate.db"));
    }
}
