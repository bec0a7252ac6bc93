//! Tab completion for the command vocabulary.
//!
//! Completion works on the whole line typed so far: every verb starting with
//! the input is offered, and when nothing matches the entire vocabulary is
//! offered instead.

use crate::protocol::Verb;
use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Returns the verbs offered for `input`.
///
/// # Example
///
/// ```
/// use mvdict::repl::complete;
///
/// assert_eq!(complete("MEM"), vec!["MEMBERS", "MEMBEREXISTS"]);
/// assert_eq!(complete("zzz").len(), 10);
/// ```
pub fn complete(input: &str) -> Vec<&'static str> {
    let hits: Vec<&'static str> = Verb::ALL
        .iter()
        .map(|verb| verb.name())
        .filter(|name| name.starts_with(input))
        .collect();

    if hits.is_empty() {
        Verb::ALL.iter().map(|verb| verb.name()).collect()
    } else {
        hits
    }
}

/// Line editor helper that completes verbs.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for CommandCompleter {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let typed = line.get(..pos).unwrap_or(line);
        let candidates = complete(typed).into_iter().map(String::from).collect();
        // Candidates replace everything typed so far
        Ok((0, candidates))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
