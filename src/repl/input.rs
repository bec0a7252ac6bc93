//! Line Sources
//!
//! The REPL pulls one line at a time from a [`LineSource`]:
//!
//! - **Terminal**: a line editor (history, tab completion) running on its own
//!   thread. A line is only read after the driver asks for it, so the prompt
//!   never overtakes the previous response.
//! - **Stream**: any async reader split into lines, used for piped input.
//!   Bytes that are not valid UTF-8 are replaced with U+FFFD.
//!
//! ```text
//!   driver                        line-editor thread
//!     │  request ────────────────────────>│
//!     │                                   │ readline(prompt)
//!     │<──────────────────────────── reply│
//!     │  write response                   │ (idle)
//!     │  request ────────────────────────>│
//! ```

use crate::repl::completion::CommandCompleter;
use crate::repl::driver::ReplError;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::sync::mpsc as std_mpsc;
use std::thread;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// One unit of input for the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A complete line, without its line terminator
    Line(String),
    /// The user pressed Ctrl-C in the line editor
    Interrupted,
    /// No more input
    Eof,
}

type BoxedReader = Box<dyn AsyncRead + Unpin + Send>;

/// Where REPL input comes from.
pub enum LineSource {
    Terminal(TerminalReader),
    Stream(StreamReader),
}

impl LineSource {
    /// Starts a line editor on the controlling terminal.
    pub fn terminal(prompt: impl Into<String>) -> Result<Self, ReplError> {
        Ok(LineSource::Terminal(TerminalReader::spawn(prompt.into())?))
    }

    /// Reads plain lines from an async reader.
    ///
    /// Both `\n` and `\r\n` terminators are stripped. Invalid UTF-8 is
    /// replaced rather than reported, so one bad line never ends the session.
    pub fn stream<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let reader: BoxedReader = Box::new(reader);
        LineSource::Stream(StreamReader {
            reader: BufReader::new(reader),
            buf: Vec::new(),
        })
    }

    /// Waits for the next input.
    ///
    /// This is cancel safe: if the future is dropped before completing, no
    /// line is lost.
    pub async fn next_input(&mut self) -> Result<Input, ReplError> {
        match self {
            LineSource::Terminal(terminal) => terminal.next_input().await,
            LineSource::Stream(stream) => Ok(match stream.next_line().await? {
                Some(line) => Input::Line(line),
                None => Input::Eof,
            }),
        }
    }
}

/// Splits an async reader into lines.
pub struct StreamReader {
    reader: BufReader<BoxedReader>,
    /// Bytes of the current line read so far; survives a cancelled read
    buf: Vec<u8>,
}

impl StreamReader {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.reader.read_until(b'\n', &mut self.buf).await?;
        if self.buf.is_empty() {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Ok(Some(line))
    }
}

/// Handle to the line-editor thread.
pub struct TerminalReader {
    /// Asks the editor thread to read one more line
    requests: std_mpsc::Sender<()>,
    /// Lines (or editor events) coming back
    replies: mpsc::UnboundedReceiver<Result<Input, ReplError>>,
    /// A request was sent and its reply has not been received yet
    pending: bool,
}

impl TerminalReader {
    /// Spawns the editor thread. The editor itself is created on that thread.
    pub fn spawn(prompt: String) -> Result<Self, ReplError> {
        let (request_tx, request_rx) = std_mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        thread::Builder::new()
            .name("line-editor".to_string())
            .spawn(move || editor_loop(prompt, request_rx, reply_tx))?;

        Ok(Self {
            requests: request_tx,
            replies: reply_rx,
            pending: false,
        })
    }

    async fn next_input(&mut self) -> Result<Input, ReplError> {
        if !self.pending {
            if self.requests.send(()).is_err() {
                return Ok(Input::Eof);
            }
            self.pending = true;
        }

        let reply = self.replies.recv().await;
        self.pending = false;
        reply.unwrap_or(Ok(Input::Eof))
    }
}

/// Body of the line-editor thread. Exits after end of input, an interrupt, an
/// editor error, or when the driver goes away.
fn editor_loop(
    prompt: String,
    requests: std_mpsc::Receiver<()>,
    replies: mpsc::UnboundedSender<Result<Input, ReplError>>,
) {
    let mut editor = match Editor::<CommandCompleter, DefaultHistory>::new() {
        Ok(editor) => editor,
        Err(e) => {
            error!(error = %e, "Failed to start line editor");
            let _ = replies.send(Err(ReplError::Readline(e)));
            return;
        }
    };
    editor.set_helper(Some(CommandCompleter::new()));

    while requests.recv().is_ok() {
        let line = editor.readline(&prompt);
        if let Ok(line) = &line {
            if !line.is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }
        }
        let reply = editor_reply(line);

        let finished = !matches!(reply, Ok(Input::Line(_)));
        if replies.send(reply).is_err() || finished {
            break;
        }
    }

    debug!("Line editor stopped");
}

/// Maps one line-editor result to REPL input.
fn editor_reply(line: Result<String, ReadlineError>) -> Result<Input, ReplError> {
    match line {
        Ok(line) => Ok(Input::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
        Err(ReadlineError::Eof) => Ok(Input::Eof),
        Err(e) => Err(ReplError::Readline(e)),
    }
}
