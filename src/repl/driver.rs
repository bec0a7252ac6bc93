//! REPL Driver
//!
//! Runs the read-eval-print loop: pull a line, execute it, write the response,
//! repeat until input ends or the user interrupts.
//!
//! ## Session Lifecycle
//!
//! ```text
//! 1. Session starts
//!        │
//!        ▼
//! 2. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Next line (or interrupt)│ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Execute command         │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Write response / ERROR  │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 3. End of input: stop quietly
//!    Interrupt:    write "Goodbye!" and stop
//! ```
//!
//! ## Output Format
//!
//! - success: `<response>\n`
//! - failure: `) ERROR, <message>\n`

use crate::commands::CommandHandler;
use crate::repl::input::{Input, LineSource};
use crate::storage::Storage;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, trace, warn};

/// Written when the user interrupts the session.
pub const GOODBYE: &str = "Goodbye!\n";

/// Statistics for a REPL session
#[derive(Debug, Default)]
pub struct ReplStats {
    /// Total input lines executed
    pub lines_processed: AtomicU64,
    /// Lines that ended in an error response
    pub commands_failed: AtomicU64,
    /// Total bytes written to the output
    pub bytes_written: AtomicU64,
}

impl ReplStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_processed(&self) {
        self.lines_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn command_failed(&self) {
        self.commands_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Errors that end a REPL session.
///
/// Command failures never appear here; they are written to the output and the
/// loop continues.
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The interactive line editor failed
    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Drives one REPL session.
pub struct Repl<S, W> {
    /// The command handler (owns the storage handle)
    handler: CommandHandler<S>,

    /// Where responses are written
    output: W,

    /// Session statistics (shared)
    stats: Arc<ReplStats>,
}

impl<S, W> Repl<S, W>
where
    S: Storage<String, String>,
    W: AsyncWrite + Unpin,
{
    /// Creates a new REPL driver.
    ///
    /// # Arguments
    ///
    /// * `handler` - The command handler that executes each line
    /// * `output` - Destination for responses
    /// * `stats` - Shared session statistics
    pub fn new(handler: CommandHandler<S>, output: W, stats: Arc<ReplStats>) -> Self {
        Self {
            handler,
            output,
            stats,
        }
    }

    /// Runs the session until input ends or `shutdown` resolves.
    ///
    /// `shutdown` stands for an external interrupt (for example Ctrl-C
    /// delivered as a signal) and is treated like an interrupt typed into the
    /// line editor.
    pub async fn run<F>(&mut self, source: &mut LineSource, shutdown: F) -> Result<(), ReplError>
    where
        F: Future<Output = ()>,
    {
        info!("REPL session started");

        let result = self.main_loop(source, shutdown).await;

        match &result {
            Ok(()) => info!(
                lines = self.stats.lines_processed.load(Ordering::Relaxed),
                failed = self.stats.commands_failed.load(Ordering::Relaxed),
                "REPL session ended"
            ),
            Err(e) => error!(error = %e, "REPL session failed"),
        }

        result
    }

    /// The read-execute-respond loop.
    async fn main_loop<F>(&mut self, source: &mut LineSource, shutdown: F) -> Result<(), ReplError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let input = tokio::select! {
                biased;
                _ = &mut shutdown => Input::Interrupted,
                input = source.next_input() => input?,
            };

            match input {
                Input::Line(line) => self.respond(&line).await?,
                Input::Interrupted => {
                    debug!("Interrupted");
                    self.write(GOODBYE.as_bytes()).await?;
                    return Ok(());
                }
                Input::Eof => {
                    debug!("End of input");
                    return Ok(());
                }
            }
        }
    }

    /// Executes one line and writes its response or error.
    pub async fn respond(&mut self, line: &str) -> Result<(), ReplError> {
        trace!(line, "Read line");

        let reply = match self.handler.execute(line) {
            Ok(response) => format!("{}\n", response),
            Err(e) => {
                self.stats.command_failed();
                warn!(error = %e, "Command failed");
                format!(") ERROR, {}\n", e)
            }
        };
        self.stats.line_processed();

        self.write(reply.as_bytes()).await
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), ReplError> {
        self.output.write_all(bytes).await?;
        self.output.flush().await?;
        self.stats.bytes_written(bytes.len());
        Ok(())
    }

    /// Consumes the driver, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Runs a REPL session to completion.
///
/// This is a convenience function that creates a [`Repl`] and runs it.
///
/// # Returns
///
/// The statistics of the finished session.
pub async fn run_session<S, W, F>(
    handler: CommandHandler<S>,
    source: &mut LineSource,
    output: W,
    shutdown: F,
) -> Result<Arc<ReplStats>, ReplError>
where
    S: Storage<String, String>,
    W: AsyncWrite + Unpin,
    F: Future<Output = ()>,
{
    let stats = Arc::new(ReplStats::new());
    let mut repl = Repl::new(handler, output, Arc::clone(&stats));
    repl.run(source, shutdown).await?;
    Ok(stats)
}
