//! # mvdict - An In-Memory Multi-Value Dictionary
//!
//! mvdict stores a mapping from string keys to sets of unique string members
//! and is driven through a small, fixed command vocabulary in a REPL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                               mvdict                                    │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ LineSource  │───>│    Repl     │───>│  Command    │                  │
//! │  │ (tty/pipe)  │    │   driver    │    │  Handler    │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │                         │
//! │                                               ▼                         │
//! │  ┌─────────────┐    ┌──────────────────────────────────────────────┐   │
//! │  │   Line      │    │              InMemoryStorage                 │   │
//! │  │   Parser    │    │   RwLock< key -> ordered set of members >    │   │
//! │  └─────────────┘    └──────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use mvdict::commands::CommandHandler;
//! use mvdict::storage::InMemoryStorage;
//! use std::sync::Arc;
//!
//! let storage = Arc::new(InMemoryStorage::new());
//! let handler = CommandHandler::new(Arc::clone(&storage));
//!
//! assert_eq!(handler.execute("ADD foo bar").unwrap(), ") Added");
//! assert_eq!(handler.execute("ADD foo baz").unwrap(), ") Added");
//! assert_eq!(handler.execute("MEMBERS foo").unwrap(), "1) bar\n2) baz");
//! assert_eq!(
//!     handler.execute("ADD foo bar").unwrap_err().to_string(),
//!     "member already exists for key"
//! );
//! ```
//!
//! ## Supported Commands
//!
//! - `KEYS`
//! - `MEMBERS key`
//! - `ADD key value`
//! - `REMOVE key value`
//! - `REMOVEALL key`
//! - `CLEAR`
//! - `KEYEXISTS key`
//! - `MEMBEREXISTS key value`
//! - `ALLMEMBERS`
//! - `ITEMS`
//!
//! ## Module Overview
//!
//! - [`storage`]: the dictionary engine and its invariants
//! - [`protocol`]: line parsing and response rendering
//! - [`commands`]: dispatch from parsed commands to storage
//! - [`repl`]: the interactive driver, line sources and completion
//! - [`cli`]: command-line configuration

pub mod cli;
pub mod commands;
pub mod protocol;
pub mod repl;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::CommandHandler;
pub use protocol::{Command, CommandError, Response, Verb};
pub use repl::{run_session, LineSource, Repl, ReplError, ReplStats};
pub use storage::{InMemoryStorage, Storage, StorageError};

/// The prompt shown by the interactive line editor
pub const DEFAULT_PROMPT: &str = "> ";

/// Version of mvdict
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
