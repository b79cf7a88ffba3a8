//! CLI command definitions and dispatch for the `caremate` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// A small symptom-chat service with canned, keyword-matched replies.
#[derive(Parser)]
#[command(name = "caremate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8787)]
        port: u16,

        /// Host to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Chat from the terminal as the given user.
    Chat {
        /// Email to sign in with (signed up on first use).
        #[arg(long)]
        email: String,

        /// Display name, used when the email is new.
        #[arg(long)]
        name: Option<String>,
    },

    /// Show store statistics.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
