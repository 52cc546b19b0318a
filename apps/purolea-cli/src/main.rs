//! # Purolea Quote Command Line
//!
//! Entry point for pricing and saving production quotes from a terminal.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Purolea Quote CLI                                │
//! │                                                                         │
//! │  main.rs ─────► Sets up logging, configuration, database                │
//! │                                                                         │
//! │  cli.rs ──────► clap definitions (subcommands and flags)                │
//! │                                                                         │
//! │  commands/ ───► products, tiers, price, save, export, quotes, add-*     │
//! │                                                                         │
//! │  config.rs ───► AppConfig from PUROLEA_* environment variables          │
//! │                                                                         │
//! │  error.rs ────► CliError with machine-readable codes                    │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │                         SQLite Database                          │   │
//! │  │  purolea.db (local file, WAL mode)                               │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, to stderr)
//! 2. Parse flags
//! 3. Load configuration, apply `--db`
//! 4. Connect to database & run migrations
//! 5. Run the command and print its output

mod cli;
mod commands;
mod config;
mod error;

use anyhow::Context;
use clap::Parser;
use purolea_db::Database;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load()?.with_db_path(cli.db.clone());
    debug!(?config, "Configuration loaded");

    if let Some(dir) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
    }

    let db = Database::new(config.db_config())
        .await
        .with_context(|| format!("opening database {}", config.db_path.display()))?;
    info!(path = %config.db_path.display(), "Database ready");

    let result = commands::execute(&db, &config, cli.command, cli.json).await;
    db.close().await;

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(err.code.exit_status());
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays pipeable.
/// Default filter: `info,purolea=debug,sqlx=warn`; override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,purolea=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
