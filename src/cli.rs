use clap::{Args, Parser, Subcommand};

use crate::DEFAULT_PROMPT;

#[derive(Parser, Debug)]
#[command(name = "multivalue-dict")]
#[command(version, about = "CLI that stores a multi-value string dictionary in memory")]
pub struct Cli {
    /// Log filter directive (e.g. "info", "mvdict=debug"); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a REPL to run commands against the in-memory storage
    Repl(ReplArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReplArgs {
    /// Prompt shown by the interactive line editor
    #[arg(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Read plain lines from stdin even when it is a terminal
    #[arg(long)]
    pub plain: bool,
}
