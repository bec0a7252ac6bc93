//! Line Protocol
//!
//! The text protocol spoken by the REPL: one command per line in, one rendered
//! response (or error) per line out.
//!
//! ## Modules
//!
//! - `parser`: splits a line into a verb and arguments and checks arity
//! - `types`: defines `Response` and its two rendering shapes
//!
//! ## Example
//!
//! ```
//! use mvdict::protocol::{Command, Response};
//!
//! let command = Command::parse("MEMBERS fruit").unwrap();
//! assert_eq!(command, Command::Members { key: "fruit".into() });
//!
//! let response = Response::list(["apple", "pear"]);
//! assert_eq!(response.to_string(), "1) apple\n2) pear");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{Command, CommandError, CommandResult, Verb};
pub use types::{Response, EMPTY_SET};
