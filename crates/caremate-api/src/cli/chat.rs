//! Interactive terminal chat.
//!
//! Drives a `ChatWorkspace` over stdin lines: plain input becomes an
//! exchange, slash commands manage sessions. The loop also subscribes to
//! the auth-event bus and ends when this user signs out, mirroring a
//! client tearing down its view on an auth change.

use std::sync::Arc;

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use caremate_core::auth::{AuthEvent, AuthService};
use caremate_core::chat::workspace::ChatWorkspace;
use caremate_types::chat::MessageRole;
use caremate_types::error::AuthError;

use crate::state::AppState;

/// Run the interactive chat loop for a user, signing them up on first use.
pub async fn run_chat(state: &AppState, email: &str, name: Option<&str>) -> anyhow::Result<()> {
    let auth_session = match state.auth_service.sign_in(email).await {
        Ok(session) => session,
        Err(AuthError::UnknownEmail) => state.auth_service.sign_up(email, name).await?,
        Err(e) => return Err(e.into()),
    };
    state.auth_events.publish(AuthEvent::SignedIn {
        user: auth_session.user.clone(),
    });
    let mut auth_rx = state.auth_events.subscribe();

    let mut workspace = ChatWorkspace::new(Arc::clone(&state.chat_service), auth_session.user);
    workspace.load().await;
    if workspace.current_session().is_none() {
        workspace.new_chat().await;
    }

    print_header(&workspace);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim().to_string();
                if input.is_empty() {
                    continue;
                }
                if let Some(command) = input.strip_prefix('/') {
                    if !handle_command(state, &mut workspace, command, &auth_session.token).await? {
                        // Sign-out was requested; let the event close the loop.
                        continue;
                    }
                } else {
                    workspace.send(&input).await;
                    print_last_reply(&workspace);
                }
            }
            event = auth_rx.recv() => {
                if let Ok(AuthEvent::SignedOut { user_id }) = event
                    && user_id == workspace.user().id
                {
                    println!("\n  {}", style("Signed out.").dim());
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Handle a slash command. Returns false when the loop should not prompt
/// again (sign-out in flight).
async fn handle_command<S, M>(
    state: &AppState,
    workspace: &mut ChatWorkspace<S, M>,
    command: &str,
    token: &str,
) -> anyhow::Result<bool>
where
    S: caremate_core::chat::repository::SessionRepository,
    M: caremate_core::chat::repository::MessageRepository,
{
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("new") => {
            workspace.new_chat().await;
            println!("  {}", style("Started a new chat.").green());
        }
        Some("sessions") => print_sessions(workspace),
        Some("switch") => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n >= 1 && n <= workspace.sessions().len() => {
                let id = workspace.sessions()[n - 1].id;
                workspace.select_session(id).await;
                print_messages(workspace);
            }
            _ => println!("  usage: /switch <number from /sessions>"),
        },
        Some("quit") => {
            state.auth_service.sign_out(token).await?;
            state.auth_events.publish(AuthEvent::SignedOut {
                user_id: workspace.user().id,
            });
            return Ok(false);
        }
        _ => println!("  commands: /new, /sessions, /switch <n>, /quit"),
    }
    Ok(true)
}

fn print_header<S, M>(workspace: &ChatWorkspace<S, M>)
where
    S: caremate_core::chat::repository::SessionRepository,
    M: caremate_core::chat::repository::MessageRepository,
{
    println!();
    println!(
        "  {} Signed in as {}",
        style("💬").bold(),
        style(&workspace.user().email).cyan()
    );
    println!(
        "  {}",
        style("Describe a symptom, or use /new, /sessions, /switch <n>, /quit").dim()
    );
    println!();
    print_messages(workspace);
}

fn print_sessions<S, M>(workspace: &ChatWorkspace<S, M>)
where
    S: caremate_core::chat::repository::SessionRepository,
    M: caremate_core::chat::repository::MessageRepository,
{
    let selected = workspace.current_session().map(|s| s.id);
    for (i, session) in workspace.sessions().iter().enumerate() {
        let marker = if Some(session.id) == selected { "*" } else { " " };
        println!(
            "  {marker} {} {} ({})",
            i + 1,
            session.title,
            session.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_messages<S, M>(workspace: &ChatWorkspace<S, M>)
where
    S: caremate_core::chat::repository::SessionRepository,
    M: caremate_core::chat::repository::MessageRepository,
{
    for message in workspace.messages() {
        let label = match message.role {
            MessageRole::User => style("you").cyan(),
            MessageRole::Assistant => style("caremate").green(),
        };
        println!("  {label}: {}", message.content);
    }
}

fn print_last_reply<S, M>(workspace: &ChatWorkspace<S, M>)
where
    S: caremate_core::chat::repository::SessionRepository,
    M: caremate_core::chat::repository::MessageRepository,
{
    if let Some(last) = workspace.messages().last() {
        if last.role == MessageRole::Assistant {
            println!("  {}: {}", style("caremate").green(), last.content);
        } else {
            // Partial exchange: the user row saved but no reply appeared.
            println!("  {}", style("(no reply was saved)").dim());
        }
    }
}
