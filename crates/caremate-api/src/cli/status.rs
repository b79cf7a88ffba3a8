//! Store statistics for the `status` command.

use console::style;
use sqlx::Row;

use caremate_core::chat::repository::{MessageRepository, SessionRepository};

use crate::state::AppState;

/// Print user/session/message counts.
pub async fn status(state: &AppState, json: bool) -> anyhow::Result<()> {
    let users: i64 = sqlx::query("SELECT COUNT(*) as cnt FROM users")
        .fetch_one(&state.db_pool.reader)
        .await?
        .try_get("cnt")?;
    let sessions = state.chat_service.session_repo().count_sessions().await?;
    let messages = state.chat_service.message_repo().count_messages().await?;

    if json {
        let stats = serde_json::json!({
            "users": users,
            "sessions": sessions,
            "messages": messages,
            "data_dir": state.data_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!();
        println!("  {} Caremate store", style("📋").bold());
        println!();
        println!("  users:    {}", style(users).cyan());
        println!("  sessions: {}", style(sessions).cyan());
        println!("  messages: {}", style(messages).cyan());
        println!("  data dir: {}", style(state.data_dir.display()).dim());
        println!();
    }

    Ok(())
}
