//! Command Line Parser
//!
//! Turns one raw input line into a typed [`Command`].
//!
//! ## Wire Contract
//!
//! The line is split on every single space character. There is no quoting,
//! escaping or whitespace collapsing, so `"ADD  foo bar"` has four tokens (one
//! of them empty) and fails the arity check for `ADD`.
//!
//! The first token is the verb, matched case-sensitively. Each verb requires an
//! exact number of tokens (its arity, counting the verb itself):
//!
//! ```text
//! KEYS                          1
//! MEMBERS <key>                 2
//! ADD <key> <value>             3
//! REMOVE <key> <value>          3
//! REMOVEALL <key>               2
//! CLEAR                         1
//! KEYEXISTS <key>               2
//! MEMBEREXISTS <key> <value>    3
//! ALLMEMBERS                    1
//! ITEMS                         1
//! ```

use crate::storage::StorageError;
use std::fmt;
use thiserror::Error;

/// Errors produced while interpreting a command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Wrong number of tokens for a known verb
    #[error("Syntax error; expected {usage}")]
    Syntax { usage: &'static str },

    /// The verb is not in the vocabulary; carries the whole input line
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// The storage engine rejected the operation
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// The fixed command vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Keys,
    Members,
    Add,
    Remove,
    RemoveAll,
    Clear,
    KeyExists,
    MemberExists,
    AllMembers,
    Items,
}

impl Verb {
    /// Every verb, in vocabulary order.
    pub const ALL: [Verb; 10] = [
        Verb::Keys,
        Verb::Members,
        Verb::Add,
        Verb::Remove,
        Verb::RemoveAll,
        Verb::Clear,
        Verb::KeyExists,
        Verb::MemberExists,
        Verb::AllMembers,
        Verb::Items,
    ];

    /// Looks up a verb by its exact (uppercase) name.
    pub fn from_name(name: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.name() == name)
    }

    /// The verb as typed on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Verb::Keys => "KEYS",
            Verb::Members => "MEMBERS",
            Verb::Add => "ADD",
            Verb::Remove => "REMOVE",
            Verb::RemoveAll => "REMOVEALL",
            Verb::Clear => "CLEAR",
            Verb::KeyExists => "KEYEXISTS",
            Verb::MemberExists => "MEMBEREXISTS",
            Verb::AllMembers => "ALLMEMBERS",
            Verb::Items => "ITEMS",
        }
    }

    /// Required token count, including the verb.
    pub const fn arity(self) -> usize {
        match self {
            Verb::Keys | Verb::Clear | Verb::AllMembers | Verb::Items => 1,
            Verb::Members | Verb::RemoveAll | Verb::KeyExists => 2,
            Verb::Add | Verb::Remove | Verb::MemberExists => 3,
        }
    }

    /// Usage string quoted in syntax errors.
    pub const fn usage(self) -> &'static str {
        match self {
            Verb::Keys => "KEYS",
            Verb::Members => "MEMBERS <key>",
            Verb::Add => "ADD <key> <value>",
            Verb::Remove => "REMOVE <key> <value>",
            Verb::RemoveAll => "REMOVEALL <key>",
            Verb::Clear => "CLEAR",
            Verb::KeyExists => "KEYEXISTS <key>",
            Verb::MemberExists => "MEMBEREXISTS <key> <value>",
            Verb::AllMembers => "ALLMEMBERS",
            Verb::Items => "ITEMS",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Keys,
    Members { key: String },
    Add { key: String, value: String },
    Remove { key: String, value: String },
    RemoveAll { key: String },
    Clear,
    KeyExists { key: String },
    MemberExists { key: String, value: String },
    AllMembers,
    Items,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Example
    ///
    /// ```
    /// use mvdict::protocol::{Command, CommandError};
    ///
    /// assert_eq!(
    ///     Command::parse("ADD foo bar"),
    ///     Ok(Command::Add { key: "foo".into(), value: "bar".into() })
    /// );
    /// assert_eq!(
    ///     Command::parse("ADD foo").unwrap_err().to_string(),
    ///     "Syntax error; expected ADD <key> <value>"
    /// );
    /// assert!(matches!(Command::parse("add foo bar"), Err(CommandError::UnknownCommand(_))));
    /// ```
    pub fn parse(line: &str) -> CommandResult<Command> {
        let args: Vec<&str> = line.split(' ').collect();

        let verb = Verb::from_name(args[0])
            .ok_or_else(|| CommandError::UnknownCommand(line.to_string()))?;

        if args.len() != verb.arity() {
            return Err(CommandError::Syntax {
                usage: verb.usage(),
            });
        }

        let arg = |i: usize| args[i].to_string();

        let command = match verb {
            Verb::Keys => Command::Keys,
            Verb::Members => Command::Members { key: arg(1) },
            Verb::Add => Command::Add {
                key: arg(1),
                value: arg(2),
            },
            Verb::Remove => Command::Remove {
                key: arg(1),
                value: arg(2),
            },
            Verb::RemoveAll => Command::RemoveAll { key: arg(1) },
            Verb::Clear => Command::Clear,
            Verb::KeyExists => Command::KeyExists { key: arg(1) },
            Verb::MemberExists => Command::MemberExists {
                key: arg(1),
                value: arg(2),
            },
            Verb::AllMembers => Command::AllMembers,
            Verb::Items => Command::Items,
        };

        Ok(command)
    }

    /// The verb this command was parsed from.
    pub fn verb(&self) -> Verb {
        match self {
            Command::Keys => Verb::Keys,
            Command::Members { .. } => Verb::Members,
            Command::Add { .. } => Verb::Add,
            Command::Remove { .. } => Verb::Remove,
            Command::RemoveAll { .. } => Verb::RemoveAll,
            Command::Clear => Verb::Clear,
            Command::KeyExists { .. } => Verb::KeyExists,
            Command::MemberExists { .. } => Verb::MemberExists,
            Command::AllMembers => Verb::AllMembers,
            Command::Items => Verb::Items,
        }
    }
}
