//! Command Handler Module
//!
//! Executes parsed command lines against a [`Storage`] implementation and
//! renders the results.
//!
//! ## Responses
//!
//! - `KEYS` - numbered list of keys
//! - `MEMBERS key` - numbered list of the key's members
//! - `ADD key value` - `) Added`
//! - `REMOVE key value` - `) Removed`
//! - `REMOVEALL key` - `) Removed`
//! - `CLEAR` - `) Cleared`
//! - `KEYEXISTS key` - `) true` / `) false`
//! - `MEMBEREXISTS key value` - `) true` / `) false`
//! - `ALLMEMBERS` - numbered list of every member
//! - `ITEMS` - numbered list of `key: value` lines
//!
//! Storage failures are returned as `CommandError::Storage` and displayed with
//! the storage engine's own message.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │   parse()   │───>│  dispatch() │───>│  render()   │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! │                            │                                │
//! │                            ▼                                │
//! │                     impl Storage                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::protocol::{Command, CommandResult, Response};
use crate::storage::{InMemoryStorage, Storage};
use std::sync::Arc;
use tracing::debug;

/// Handles command lines by dispatching them to the storage engine.
///
/// The handler keeps no state between calls besides the storage it points at.
pub struct CommandHandler<S = InMemoryStorage<String, String>> {
    /// The storage engine
    storage: Arc<S>,
}

impl<S> Clone for CommandHandler<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S> CommandHandler<S>
where
    S: Storage<String, String>,
{
    /// Creates a new command handler over the given storage engine.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Returns the storage engine this handler dispatches to.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Executes one raw input line and returns the rendered response.
    ///
    /// # Example
    ///
    /// ```
    /// use mvdict::commands::CommandHandler;
    /// use mvdict::storage::InMemoryStorage;
    /// use std::sync::Arc;
    ///
    /// let handler = CommandHandler::new(Arc::new(InMemoryStorage::new()));
    /// assert_eq!(handler.execute("ADD foo bar").unwrap(), ") Added");
    /// assert_eq!(handler.execute("MEMBERS foo").unwrap(), "1) bar");
    /// ```
    pub fn execute(&self, line: &str) -> CommandResult<String> {
        let command = Command::parse(line)?;
        debug!(command = %command.verb(), "Executing command");
        Ok(self.dispatch(command)?.to_string())
    }

    /// Runs a parsed command against storage.
    pub fn dispatch(&self, command: Command) -> CommandResult<Response> {
        let response = match command {
            Command::Keys => Response::list(self.storage.keys()),
            Command::Add { key, value } => {
                self.storage.add(key, value)?;
                Response::message("Added")
            }
            Command::Members { key } => Response::list(self.storage.members(&key)?),
            Command::Remove { key, value } => {
                self.storage.remove(&key, &value)?;
                Response::message("Removed")
            }
            Command::RemoveAll { key } => {
                self.storage.remove_all(&key)?;
                Response::message("Removed")
            }
            Command::Clear => {
                self.storage.clear();
                Response::message("Cleared")
            }
            Command::KeyExists { key } => Response::message(self.storage.key_exists(&key)),
            Command::MemberExists { key, value } => {
                Response::message(self.storage.member_exists(&key, &value)?)
            }
            Command::AllMembers => Response::list(self.storage.all_members()),
            Command::Items => Response::pairs(self.storage.items()),
        };

        Ok(response)
    }
}
