//! CLI entry point for Linkdeck.
//!
//! This binary provides the `linkdeck` command with subcommands for
//! starting the web server and checking system status.

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use linkdeck_store::{CredentialStore, Database, LinkStore};
use linkdeck_web::{WebConfig, WebServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            port,
            db,
            secret,
        } => cmd_serve(bind, port, db, secret).await,
        Commands::Status { db } => cmd_status(db).await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(bind: String, port: u16, db_path: PathBuf, secret: Option<String>) -> Result<()> {
    init_tracing("info");

    let secret = match secret.or_else(|| std::env::var("LINKDECK_SESSION_SECRET").ok()) {
        Some(s) if !s.is_empty() => s,
        _ => bail!(
            "no session secret configured; pass --secret or set LINKDECK_SESSION_SECRET"
        ),
    };

    if let Some(dir) = db_path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        std::fs::create_dir_all(dir).context("failed to create data directory")?;
    }

    let db = Database::open_and_migrate(db_path.clone())
        .await
        .context("failed to open database")?;
    info!(path = %db_path.display(), "store initialized");

    let config = WebConfig {
        bind_addr: bind,
        port,
    };
    let server = WebServer::new(config, db, secret.as_bytes());
    info!(addr = %server.addr(), "starting web server");

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("web server failed: {e}"))
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

async fn cmd_status(db_path: PathBuf) -> Result<()> {
    init_tracing("warn");

    println!();
    println!("  Linkdeck Status");
    println!("  ===============");
    println!();

    if !db_path.exists() {
        println!("  Database:   NOT INITIALIZED ({})", db_path.display());
        println!("              run `linkdeck serve` to create it");
        println!();
        return Ok(());
    }
    println!("  Database:   OK ({})", db_path.display());

    let db = Database::open_and_migrate(db_path)
        .await
        .context("failed to open database")?;

    let tree = LinkStore::new(db.clone()).load().await?;
    let links: usize = tree.categories.iter().map(|c| c.links.len()).sum();
    println!(
        "  Links:      {} across {} categories",
        links,
        tree.categories.len()
    );

    let record = CredentialStore::new(db).load().await?;
    println!("  User:       {}", record.username);
    if record.must_change() {
        println!("  Password:   FACTORY DEFAULT (change required on next login)");
    } else {
        println!("  Password:   set");
    }

    match std::env::var("LINKDECK_SESSION_SECRET") {
        Ok(_) => println!("  Secret:     CONFIGURED (env)"),
        Err(_) => println!("  Secret:     NOT SET (pass --secret to `serve`)"),
    }

    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
