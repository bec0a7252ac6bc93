//! Command Handler Module
//!
//! This module implements the command processing layer. It receives raw
//! input lines, executes them against the storage engine, and returns the
//! rendered response text.
//!
//! ## Architecture
//!
//! ```text
//! REPL input line
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  Line Parser    │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Render       │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ impl Storage    │  (storage module)
//! └─────────────────┘
//! ```

pub mod handler;

// Re-export the main command handler
pub use handler::CommandHandler;
