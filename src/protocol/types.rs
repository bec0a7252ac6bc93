//! Response Types
//!
//! Every successful command renders to one of two plain-text shapes.
//!
//! ## Formats
//!
//! Single value: `) <message>`
//!
//! ```text
//! ) Added
//! ) true
//! ```
//!
//! Sequence: one 1-indexed line per element, or `(empty set)`
//!
//! ```text
//! 1) bar
//! 2) baz
//! ```

use std::fmt;

/// Rendered in place of a sequence with no elements.
pub const EMPTY_SET: &str = "(empty set)";

/// A successful command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A short status or scalar value, rendered as `) <message>`
    Message(String),

    /// A sequence of already-formatted elements
    List(Vec<String>),
}

impl Response {
    /// Creates a single-value response.
    ///
    /// # Example
    /// ```
    /// use mvdict::protocol::Response;
    /// assert_eq!(Response::message("Added").to_string(), ") Added");
    /// assert_eq!(Response::message(true).to_string(), ") true");
    /// ```
    pub fn message(message: impl ToString) -> Self {
        Response::Message(message.to_string())
    }

    /// Creates a sequence response from anything displayable.
    ///
    /// # Example
    /// ```
    /// use mvdict::protocol::Response;
    /// assert_eq!(Response::list(["foo", "bar"]).to_string(), "1) foo\n2) bar");
    /// assert_eq!(Response::list(Vec::<String>::new()).to_string(), "(empty set)");
    /// ```
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Response::List(items.into_iter().map(|item| item.to_string()).collect())
    }

    /// Creates a sequence response of `key: value` lines.
    pub fn pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        Response::List(
            pairs
                .into_iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect(),
        )
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Message(message) => write!(f, ") {}", message),
            Response::List(items) if items.is_empty() => f.write_str(EMPTY_SET),
            Response::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}) {}", i + 1, item)?;
                }
                Ok(())
            }
        }
    }
}
