//! Interactive input back ends.
//!
//! [`Console::prompt`](crate::console::Console::prompt) and
//! [`Console::select`](crate::console::Console::select) own the defaulting
//! and validation rules; a [`Prompter`] only performs the exchange.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use inquire::{Select, Text};
use parking_lot::Mutex;
use tracing::debug;

use crate::ui::is_input_closed;

/// The outcome of one exchange with the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A line of text, already trimmed.
    Text(String),
    /// A zero-based option index picked by a menu.
    Index(usize),
    /// The input stream is closed or unreadable.
    Closed,
}

/// A source of user answers.
pub trait Prompter: Send + Sync {
    /// Asks a free-text question.
    fn read_text(&self, question: &str, default: Option<&str>) -> Reply;

    /// Asks for one of `options`; `default` is an index into `options`.
    fn read_choice(&self, question: &str, options: &[String], default: Option<usize>) -> Reply;
}

/// Terminal prompts with arrow-key menus, backed by inquire.
#[derive(Debug, Clone, Copy, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn read_text(&self, question: &str, default: Option<&str>) -> Reply {
        let mut text = Text::new(question);
        if let Some(default) = default {
            text = text.with_default(default);
        }

        match text.prompt() {
            Ok(answer) => Reply::Text(answer.trim().to_string()),
            Err(err) => {
                debug!(error = %err, closed = is_input_closed(&err), "text prompt ended without input");
                Reply::Closed
            }
        }
    }

    fn read_choice(&self, question: &str, options: &[String], default: Option<usize>) -> Reply {
        let select = Select::new(question, options.to_vec()).with_starting_cursor(default.unwrap_or(0));

        match select.raw_prompt() {
            Ok(choice) => Reply::Index(choice.index),
            Err(err) => {
                debug!(error = %err, closed = is_input_closed(&err), "select prompt ended without input");
                Reply::Closed
            }
        }
    }
}

/// Line-based prompts over any reader/writer pair, with numbered menus.
///
/// Used when stdin is not a terminal.
pub struct LinePrompter<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> LinePrompter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Returns the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }

    fn exchange(&self, write: impl FnOnce(&mut W) -> std::io::Result<()>) -> Reply {
        let mut io = self.io.lock();
        let (reader, writer) = &mut *io;

        if let Err(err) = write(writer).and_then(|()| writer.flush()) {
            debug!(error = %err, "failed to write prompt");
            return Reply::Closed;
        }

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => Reply::Closed,
            Ok(_) => Reply::Text(line.trim().to_string()),
            Err(err) => {
                debug!(error = %err, "failed to read answer");
                Reply::Closed
            }
        }
    }
}

impl<R, W> Prompter for LinePrompter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn read_text(&self, question: &str, default: Option<&str>) -> Reply {
        self.exchange(|out| match default {
            Some(default) => write!(out, "{question} [{default}]: "),
            None => write!(out, "{question} "),
        })
    }

    fn read_choice(&self, question: &str, options: &[String], default: Option<usize>) -> Reply {
        self.exchange(|out| {
            writeln!(out, "{question}")?;
            for (i, option) in options.iter().enumerate() {
                writeln!(out, "  {}) {option}", i + 1)?;
            }
            match default {
                Some(i) => write!(out, "Enter a number [{}]: ", i + 1),
                None => write!(out, "Enter a number: "),
            }
        })
    }
}

/// Answers prompts from a fixed script; for tests and unattended runs.
///
/// Each answer is consumed by one question. Once the script is exhausted
/// the input reads as closed.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }

    fn next_answer(&self, question: &str) -> Reply {
        self.asked.lock().push(question.to_string());
        self.answers
            .lock()
            .pop_front()
            .map_or(Reply::Closed, |answer| Reply::Text(answer.trim().to_string()))
    }
}

impl Prompter for ScriptedPrompter {
    fn read_text(&self, question: &str, _default: Option<&str>) -> Reply {
        self.next_answer(question)
    }

    fn read_choice(&self, question: &str, _options: &[String], _default: Option<usize>) -> Reply {
        self.next_answer(question)
    }
}
