//! multivalue-dict - An In-Memory Multi-Value Dictionary REPL
//!
//! This is the main entry point. It sets up logging, creates the storage
//! engine, and runs a REPL session on stdin/stdout.

use clap::Parser;
use mvdict::cli::{Cli, Commands, ReplArgs};
use mvdict::commands::CommandHandler;
use mvdict::repl::{run_session, LineSource};
use mvdict::storage::InMemoryStorage;
use std::io::IsTerminal;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging; stderr keeps logs out of REPL output
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    match cli.command {
        Commands::Repl(args) => run_repl(args).await,
    }
}

/// Runs the REPL against a fresh, empty dictionary.
async fn run_repl(args: ReplArgs) -> anyhow::Result<()> {
    // The one dictionary for this process, handed to the handler explicitly
    let storage = Arc::new(InMemoryStorage::new());
    let handler = CommandHandler::new(Arc::clone(&storage));

    let mut source = if !args.plain && std::io::stdin().is_terminal() {
        LineSource::terminal(args.prompt)?
    } else {
        LineSource::stream(tokio::io::stdin())
    };

    // Ctrl-C outside the line editor arrives as a signal
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    let stats = run_session(handler, &mut source, tokio::io::stdout(), shutdown).await?;

    let storage_stats = storage.stats();
    info!(
        keys = storage_stats.keys,
        members = storage_stats.members,
        adds = storage_stats.add_ops,
        removes = storage_stats.remove_ops,
        bytes_written = stats.bytes_written.load(Ordering::Relaxed),
        "Dictionary discarded"
    );

    // A piped stdin read may still be parked on a blocking thread; the
    // runtime would wait for it on shutdown.
    std::process::exit(0)
}
