//! CLI argument definitions for Linkdeck.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Linkdeck -- a single-user bookmark dashboard.
#[derive(Parser)]
#[command(
    name = "linkdeck",
    version,
    about = "Linkdeck -- single-user bookmark dashboard",
    long_about = "A self-hosted bookmark dashboard with categorized links, drag-and-drop \
                  reordering, and cookie-session authentication."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server with the embedded dashboard UI.
    Serve {
        /// Address to bind the HTTP server to.
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on.
        #[arg(long, short, default_value_t = 8420)]
        port: u16,

        /// Path to the SQLite database file.
        #[arg(long, default_value = "data/linkdeck.db")]
        db: PathBuf,

        /// Session signing secret. Falls back to the LINKDECK_SESSION_SECRET
        /// environment variable when omitted.
        #[arg(long)]
        secret: Option<String>,
    },

    /// Show current system status.
    Status {
        /// Path to the SQLite database file.
        #[arg(long, default_value = "data/linkdeck.db")]
        db: PathBuf,
    },
}
