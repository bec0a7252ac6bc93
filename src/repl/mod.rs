//! REPL Module
//!
//! This module is the front end of the dictionary: it reads command lines from
//! a terminal or a pipe, hands them to the command handler, and writes the
//! responses back out.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────┐      ┌───────────────────────┐
//! │ LineSource            │      │ shutdown future       │
//! │  - Terminal (editor)  │      │ (Ctrl-C signal)       │
//! │  - Stream (pipe)      │      └───────────┬───────────┘
//! └──────────┬────────────┘                  │
//!            │ next line                     │ interrupt
//!            ▼                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Repl                               │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │  Read line  │───>│ Execute cmd │───>│ Write reply │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use mvdict::commands::CommandHandler;
//! use mvdict::repl::{run_session, LineSource};
//! use mvdict::storage::InMemoryStorage;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let handler = CommandHandler::new(Arc::new(InMemoryStorage::new()));
//! let mut source = LineSource::stream(&b"ADD foo bar\nKEYS\n"[..]);
//! let mut output = Vec::new();
//!
//! run_session(handler, &mut source, &mut output, std::future::pending()).await.unwrap();
//! assert_eq!(output, b") Added\n1) foo\n");
//! # });
//! ```

pub mod completion;
pub mod driver;
pub mod input;

// Re-export commonly used types
pub use completion::{complete, CommandCompleter};
pub use driver::{run_session, Repl, ReplError, ReplStats, GOODBYE};
pub use input::{Input, LineSource, StreamReader, TerminalReader};
