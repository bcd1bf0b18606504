use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::output::LiveLine;
use crate::process::ProgressDisplay;
use crate::ui::Style;

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// A terminal spinner for indicating progress.
///
/// The animation runs on indicatif's ticker thread. Finishing the spinner
/// stops and joins that thread. Automatically clears itself when dropped
/// (RAII pattern).
pub struct Spinner {
    progress_bar: ProgressBar,
    label: String,
    color: bool,
    live: Option<LiveLine>,
}

impl Spinner {
    /// Creates and starts a new spinner on stderr with the given label.
    pub fn new(label: &str) -> Self {
        Self::with_draw_target(label, ProgressDrawTarget::stderr())
    }

    /// Creates and starts a spinner drawing to `target`.
    #[allow(clippy::unwrap_used)]
    pub fn with_draw_target(label: &str, target: ProgressDrawTarget) -> Self {
        let progress_bar = ProgressBar::with_draw_target(None, target);
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(TICK_STRINGS)
                .template("{spinner} {msg}")
                .unwrap(),
        );
        progress_bar.set_message(label.to_string());
        progress_bar.enable_steady_tick(TICK_INTERVAL);

        Self {
            progress_bar,
            label: label.to_string(),
            color: true,
            live: None,
        }
    }

    /// Enables or disables styling of the final line.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Registers the spinner as the live line so other writers go through it.
    #[must_use]
    pub fn attach(mut self, live: LiveLine) -> Self {
        live.set(self.progress_bar.clone());
        self.live = Some(live);
        self
    }

    /// Returns `true` once the spinner has been finished.
    pub fn is_finished(&self) -> bool {
        self.progress_bar.is_finished()
    }

    /// Text currently shown; the final line once the spinner has finished.
    pub fn message(&self) -> String {
        self.progress_bar.message()
    }

    /// Replaces the status text next to the spinner glyph.
    pub fn set_message(&self, message: &str) {
        self.progress_bar
            .set_message(format!("{} {message}", self.label));
    }

    /// Stops the spinner and leaves `line` in its place.
    fn finish_with_line(&mut self, line: &str) {
        self.halt();
        self.progress_bar.set_style(final_style());
        self.progress_bar.finish_with_message(line.to_string());
    }

    /// Stops the spinner and clears it from the terminal.
    pub fn stop(&mut self) {
        self.halt();
        self.progress_bar.finish_and_clear();
    }

    fn halt(&mut self) {
        if let Some(live) = self.live.take() {
            live.clear();
        }
        // dropping the ticker joins the animation thread
        self.progress_bar.disable_steady_tick();
    }
}

#[allow(clippy::unwrap_used)]
fn final_style() -> ProgressStyle {
    // unwrap is safe: template string is a compile-time constant
    ProgressStyle::default_spinner().template("{msg}").unwrap()
}

impl ProgressDisplay for Spinner {
    fn update(&mut self, line: &str) {
        self.set_message(line);
    }

    fn succeed(&mut self, line: Option<&str>) {
        let text = success_line(&self.label, line, self.color);
        self.finish_with_line(&text);
    }

    fn fail(&mut self, reason: &str) {
        let text = failure_line(&self.label, reason, self.color);
        self.finish_with_line(&text);
    }
}

/// Final line of a successful run: `✔ label [line]`.
pub fn success_line(label: &str, line: Option<&str>, color: bool) -> String {
    let glyph = paint("✔".to_string(), Style::success, color);
    match line {
        Some(line) => format!("{glyph} {label} {line}"),
        None => format!("{glyph} {label}"),
    }
}

/// Final line of a failed run: `✖ label: reason`.
pub fn failure_line(label: &str, reason: &str, color: bool) -> String {
    let glyph = paint("✖".to_string(), Style::error, color);
    let reason = paint(reason.to_string(), Style::error, color);
    format!("{glyph} {label}: {reason}")
}

fn paint(text: String, style: fn(String) -> String, color: bool) -> String {
    if color { style(text) } else { text }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.progress_bar.is_finished() {
            self.stop();
        }
    }
}
