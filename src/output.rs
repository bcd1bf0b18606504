//! Global output configuration and line emitters.
//!
//! This module provides centralized control over console output behavior,
//! including quiet mode, color support, and stderr/stdout routing.
//!
//! ## Design Principles
//!
//! - `echo`, `log` and `debug` lines go to stdout
//! - Warnings, spinners and status messages go to stderr
//! - Quiet mode suppresses non-essential output
//! - Colors can be disabled via flag or NO_COLOR environment variable
//! - While a spinner is live, every line is written through it

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::sync::OnceLock;

use indicatif::ProgressBar;
use parking_lot::Mutex;

use crate::process::ProgressDisplay;
use crate::ui::{Spinner, failure_line, success_line};

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // Check NO_COLOR environment variable (https://no-color.org/)
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }
}

/// Initialize the global output configuration.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Output stream a line is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
}

/// Sink for rendered console lines.
pub trait Emitter: Send + Sync {
    /// Whether `target` accepts ANSI styling.
    fn supports_color(&self, target: Target) -> bool;

    /// Writes one line (a newline is appended).
    fn emit(&self, target: Target, line: &str) -> io::Result<()>;

    /// Starts a live progress display labelled `label`.
    fn progress(&self, label: &str) -> Box<dyn ProgressDisplay>;
}

/// The progress bar currently owning the terminal's last line, if any.
///
/// Writers lock it and print through [`ProgressBar::suspend`] so spinner
/// redraws and regular lines never interleave.
#[derive(Clone, Default)]
pub struct LiveLine(Arc<Mutex<Option<ProgressBar>>>);

impl LiveLine {
    pub fn set(&self, bar: ProgressBar) {
        *self.0.lock() = Some(bar);
    }

    pub fn clear(&self) {
        self.0.lock().take();
    }

    pub fn is_active(&self) -> bool {
        self.0.lock().is_some()
    }

    /// Runs `f` with exclusive access to the terminal.
    pub fn write<R>(&self, f: impl FnOnce() -> R) -> R {
        let live = self.0.lock();
        match live.as_ref() {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

/// Writes to the process's stdout/stderr.
#[derive(Clone, Default)]
pub struct TerminalEmitter {
    live: LiveLine,
}

impl TerminalEmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Emitter for TerminalEmitter {
    fn supports_color(&self, target: Target) -> bool {
        if is_no_color() {
            return false;
        }
        match target {
            Target::Stdout => io::stdout().is_terminal(),
            Target::Stderr => io::stderr().is_terminal(),
        }
    }

    fn emit(&self, target: Target, line: &str) -> io::Result<()> {
        self.live.write(|| match target {
            Target::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Target::Stderr => {
                let mut err = io::stderr().lock();
                writeln!(err, "{line}")?;
                err.flush()
            }
        })
    }

    fn progress(&self, label: &str) -> Box<dyn ProgressDisplay> {
        // indicatif draws nothing to a non-terminal stderr
        if !io::stderr().is_terminal() {
            return Box::new(PlainProgress::new(self.clone(), label));
        }

        let spinner = Spinner::new(label)
            .with_color(self.supports_color(Target::Stderr))
            .attach(self.live.clone());
        Box::new(spinner)
    }
}

/// Progress without animation: only the final line is written, to stderr.
pub struct PlainProgress<E: Emitter> {
    emitter: E,
    label: String,
    finished: bool,
}

impl<E: Emitter> PlainProgress<E> {
    pub fn new(emitter: E, label: &str) -> Self {
        Self {
            emitter,
            label: label.to_string(),
            finished: false,
        }
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    fn finish(&mut self, line: &str) {
        if self.finished {
            return;
        }
        self.finished = true;
        if let Err(err) = self.emitter.emit(Target::Stderr, line) {
            tracing::debug!(error = %err, "could not write progress line");
        }
    }
}

impl<E: Emitter> ProgressDisplay for PlainProgress<E> {
    fn update(&mut self, _line: &str) {}

    fn succeed(&mut self, line: Option<&str>) {
        let color = self.emitter.supports_color(Target::Stderr);
        let text = success_line(&self.label, line, color);
        self.finish(&text);
    }

    fn fail(&mut self, reason: &str) {
        let color = self.emitter.supports_color(Target::Stderr);
        let text = failure_line(&self.label, reason, color);
        self.finish(&text);
    }
}

/// Something recorded by a [`MemoryEmitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Line { target: Target, text: String },
    ProgressStarted(String),
    ProgressUpdated(String),
    ProgressSucceeded(Option<String>),
    ProgressFailed(String),
}

#[derive(Default)]
struct MemoryState {
    records: Vec<Record>,
    active_progress: usize,
}

/// Collects output in memory; for tests and non-terminal embedding.
#[derive(Clone, Default)]
pub struct MemoryEmitter {
    state: Arc<Mutex<MemoryState>>,
    color: bool,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports color support so styled output can be inspected.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// All records in write order.
    pub fn records(&self) -> Vec<Record> {
        self.state.lock().records.clone()
    }

    /// Text of every line written to `target`.
    pub fn lines(&self, target: Target) -> Vec<String> {
        self.state
            .lock()
            .records
            .iter()
            .filter_map(|record| match record {
                Record::Line { target: t, text } if *t == target => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of progress displays started but not yet finished.
    pub fn active_progress(&self) -> usize {
        self.state.lock().active_progress
    }

    fn push(&self, record: Record) {
        self.state.lock().records.push(record);
    }
}

impl Emitter for MemoryEmitter {
    fn supports_color(&self, _target: Target) -> bool {
        self.color
    }

    fn emit(&self, target: Target, line: &str) -> io::Result<()> {
        self.push(Record::Line {
            target,
            text: line.to_string(),
        });
        Ok(())
    }

    fn progress(&self, label: &str) -> Box<dyn ProgressDisplay> {
        let mut state = self.state.lock();
        state.active_progress += 1;
        state.records.push(Record::ProgressStarted(label.to_string()));
        drop(state);

        Box::new(MemoryProgress {
            emitter: self.clone(),
            finished: false,
        })
    }
}

struct MemoryProgress {
    emitter: MemoryEmitter,
    finished: bool,
}

impl MemoryProgress {
    fn finish(&mut self, record: Record) {
        let mut state = self.emitter.state.lock();
        state.records.push(record);
        if !self.finished {
            self.finished = true;
            state.active_progress -= 1;
        }
    }
}

impl ProgressDisplay for MemoryProgress {
    fn update(&mut self, line: &str) {
        self.emitter.push(Record::ProgressUpdated(line.to_string()));
    }

    fn succeed(&mut self, line: Option<&str>) {
        self.finish(Record::ProgressSucceeded(line.map(str::to_string)));
    }

    fn fail(&mut self, reason: &str) {
        self.finish(Record::ProgressFailed(reason.to_string()));
    }
}

impl Drop for MemoryProgress {
    fn drop(&mut self) {
        if !self.finished {
            self.finished = true;
            self.emitter.state.lock().active_progress -= 1;
        }
    }
}
