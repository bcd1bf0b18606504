//! The console facade.
//!
//! [`Console`] ties the pieces together: templates are substituted,
//! optionally translated into the active language, scanned for color
//! tokens and written through an [`Emitter`]. Prompts go through a
//! [`Prompter`] and long-running work through the process runner.

use std::fmt::Display;
use std::io::{self, BufReader, IsTerminal};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{ConsoleError, FormatError};
use crate::markup::{Paint, Params, TokenRegistry, paint, scan, substitute};
use crate::output::{Emitter, Target, TerminalEmitter};
use crate::process::{ProcessRunner, ProgressStep};
use crate::prompt::{InquirePrompter, LinePrompter, Prompter, Reply};
use crate::style::StyleSpec;
use crate::translation::{Translate, canonical_code};
use crate::ui::Style;

pub const DEFAULT_DEBUG_PREFIX: &str = "DEBUG";

const WARNING_TAG: &str = "Warning:";

/// Construction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Emit `debug` lines.
    pub debug: bool,
    /// Tag shown as `[prefix]` in front of debug lines.
    pub debug_prefix: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            debug: false,
            debug_prefix: DEFAULT_DEBUG_PREFIX.to_string(),
        }
    }
}

/// Rich console output, prompts and spinner-driven processes.
pub struct Console {
    config: ConsoleConfig,
    tokens: RwLock<TokenRegistry>,
    emitter: Arc<dyn Emitter>,
    prompter: Box<dyn Prompter>,
    translator: Option<Arc<dyn Translate>>,
    language: RwLock<Option<String>>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl Console {
    /// Creates a console on the process's terminal.
    ///
    /// Prompts use arrow-key menus when stdin is a terminal and numbered
    /// line prompts otherwise.
    pub fn new(config: ConsoleConfig) -> Self {
        let prompter: Box<dyn Prompter> = if io::stdin().is_terminal() {
            Box::new(InquirePrompter)
        } else {
            Box::new(LinePrompter::new(BufReader::new(io::stdin()), io::stderr()))
        };

        Self {
            config,
            tokens: RwLock::new(TokenRegistry::default()),
            emitter: Arc::new(TerminalEmitter::new()),
            prompter,
            translator: None,
            language: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn with_emitter(mut self, emitter: impl Emitter + 'static) -> Self {
        self.emitter = Arc::new(emitter);
        self
    }

    #[must_use]
    pub fn with_prompter(mut self, prompter: impl Prompter + 'static) -> Self {
        self.prompter = Box::new(prompter);
        self
    }

    #[must_use]
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    // Tokens

    /// Adds or overwrites color tokens; tokens not named keep their style.
    ///
    /// Calling it with the default table restores the default styles of
    /// `*`, `_` and `|`.
    pub fn set_color_tokens<I, S>(&self, mapping: I)
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<StyleSpec>,
    {
        self.tokens.write().merge(mapping);
    }

    /// Replaces the whole token table.
    pub fn reset_color_tokens<I, S>(&self, mapping: I)
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<StyleSpec>,
    {
        self.tokens.write().replace(mapping);
    }

    /// A snapshot of the current token table.
    pub fn color_tokens(&self) -> TokenRegistry {
        self.tokens.read().clone()
    }

    // Output

    /// Renders `template` to a string styled for `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if a placeholder cannot be substituted.
    pub fn render(
        &self,
        template: &str,
        params: &Params,
        style: &Paint,
        target: Target,
    ) -> Result<String, FormatError> {
        let text = self.localize(substitute(template, params)?);
        let segments = scan(&text, &self.tokens.read());
        Ok(paint(&segments, style, self.emitter.supports_color(target)))
    }

    /// Writes a line with token styles applied.
    pub fn echo(&self, template: &str, params: &Params) -> Result<(), ConsoleError> {
        let line = self.render(template, params, &Paint::Tokens, Target::Stdout)?;
        self.emit(Target::Stdout, &line)
    }

    /// Writes a line entirely in the dim style.
    pub fn echo_dim(&self, template: &str, params: &Params) -> Result<(), ConsoleError> {
        let line = self.render(
            template,
            params,
            &Paint::Uniform(Style::dim_spec()),
            Target::Stdout,
        )?;
        self.emit(Target::Stdout, &line)
    }

    /// Writes a line without any styling; token delimiters are still removed.
    pub fn log(&self, template: &str, params: &Params) -> Result<(), ConsoleError> {
        let line = self.render(template, params, &Paint::Plain, Target::Stdout)?;
        self.emit(Target::Stdout, &line)
    }

    /// Writes a `[prefix]`-tagged line when debug output is enabled.
    ///
    /// Does nothing, not even substitution, when debug is off.
    pub fn debug(&self, template: &str, params: &Params) -> Result<(), ConsoleError> {
        if !self.config.debug {
            return Ok(());
        }

        let line = self.render(template, params, &Paint::Tokens, Target::Stdout)?;
        let tag = format!("[{}]", self.config.debug_prefix);
        let tag = if self.emitter.supports_color(Target::Stdout) {
            Style::debug_tag(tag)
        } else {
            tag
        };
        self.emit(Target::Stdout, &format!("{tag} {line}"))
    }

    /// Writes a `Warning:`-tagged line in the warning style to stderr.
    pub fn warn(&self, template: &str, params: &Params) -> Result<(), ConsoleError> {
        let line = self.render(
            template,
            params,
            &Paint::Uniform(Style::warning_spec()),
            Target::Stderr,
        )?;
        let tag = if self.emitter.supports_color(Target::Stderr) {
            Style::warning(WARNING_TAG)
        } else {
            WARNING_TAG.to_string()
        };
        self.emit(Target::Stderr, &format!("{tag} {line}"))
    }

    fn emit(&self, target: Target, line: &str) -> Result<(), ConsoleError> {
        self.emitter.emit(target, line)?;
        Ok(())
    }

    // Input

    /// Asks a free-text question.
    ///
    /// Empty input yields `default`, or `""` without one.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InputUnavailable`] if input is closed and there is no
    /// default.
    pub fn prompt(&self, question: &str, default: Option<&str>) -> Result<String, ConsoleError> {
        let question = self.localize(question.to_string());
        match self.prompter.read_text(&question, default) {
            Reply::Text(answer) if answer.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Reply::Text(answer) => Ok(answer),
            // menus only; treated like a closed stream
            Reply::Index(_) | Reply::Closed => default
                .map(str::to_string)
                .ok_or(ConsoleError::InputUnavailable),
        }
    }

    /// Asks the user to pick one of `options`.
    ///
    /// A typed answer is a 1-based number or an exact option label; empty
    /// input picks `default`, or the first option. Invalid answers are
    /// reported with a warning and asked again.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InvalidArgument`] if `options` is empty or `default`
    /// is not one of them, before anything is asked.
    /// [`ConsoleError::InputUnavailable`] if input is closed and there is no
    /// default.
    pub fn select<T>(&self, question: &str, options: &[T], default: Option<&T>) -> Result<T, ConsoleError>
    where
        T: Clone + Display + PartialEq,
    {
        if options.is_empty() {
            return Err(ConsoleError::InvalidArgument(
                "select needs at least one option".to_string(),
            ));
        }

        let default_index = default
            .map(|default| {
                options.iter().position(|option| option == default).ok_or_else(|| {
                    ConsoleError::InvalidArgument(format!(
                        "default '{default}' is not one of the options"
                    ))
                })
            })
            .transpose()?;

        let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
        let question = self.localize(question.to_string());

        loop {
            let picked = match self.prompter.read_choice(&question, &labels, default_index) {
                Reply::Index(index) => {
                    let option = options.get(index).ok_or_else(|| {
                        ConsoleError::InvalidArgument(format!(
                            "prompter picked option {index} of {}",
                            options.len()
                        ))
                    })?;
                    Some(option)
                }
                Reply::Text(answer) => {
                    let picked = pick(&answer, &labels, default_index).and_then(|i| options.get(i));
                    if picked.is_none() {
                        self.warn(
                            "Invalid choice '{answer}', enter a number from 1 to {count}",
                            &Params::new()
                                .with("answer", &answer)
                                .with("count", labels.len()),
                        )?;
                    }
                    picked
                }
                Reply::Closed => {
                    return default_index
                        .and_then(|i| options.get(i))
                        .cloned()
                        .ok_or(ConsoleError::InputUnavailable);
                }
            };

            if let Some(option) = picked {
                return Ok(option.clone());
            }
        }
    }

    // Processes

    /// Runs a fresh progress sequence from `source` behind a spinner labelled
    /// `message`.
    ///
    /// Returns once the spinner has stopped and its final line is written.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ProcessSource`] with the source's error, or
    /// [`ConsoleError::Format`] if a step's template is invalid.
    pub fn process<F, I>(&self, source: F, message: &str) -> Result<(), ConsoleError>
    where
        F: Fn() -> I,
        I: IntoIterator<Item = anyhow::Result<ProgressStep>>,
    {
        let mut display = self.emitter.progress(message);
        let mut runner = ProcessRunner::new(message);

        let result = runner.run(source, display.as_mut(), |step| {
            self.render(&step.message, &step.params, &Paint::Tokens, Target::Stderr)
        });

        drop(display);
        result
    }

    // Translation

    /// Sets the output language.
    ///
    /// An explicit `language` wins. Otherwise the language is detected from
    /// `text`; if detection is unavailable the current language is kept.
    /// With neither, output translation is switched off. Returns the active
    /// language.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::InvalidArgument`] for an unsupported language code.
    pub fn setup_language(
        &self,
        text: Option<&str>,
        language: Option<&str>,
    ) -> Result<Option<String>, ConsoleError> {
        if let Some(language) = language {
            let code = canonical_code(language)
                .ok_or_else(|| {
                    ConsoleError::InvalidArgument(format!("unsupported language code '{language}'"))
                })?
                .to_lowercase();
            *self.language.write() = Some(code.clone());
            return Ok(Some(code));
        }

        let Some(text) = text else {
            *self.language.write() = None;
            return Ok(None);
        };

        match self.translator.as_ref().map(|t| t.detect_language(text)) {
            Some(Ok(code)) => {
                debug!(language = %code, "output language detected");
                *self.language.write() = Some(code.clone());
                Ok(Some(code))
            }
            Some(Err(err)) => {
                debug!(error = %err, "language detection failed; keeping current language");
                Ok(self.language())
            }
            None => {
                debug!("no translator attached; keeping current language");
                Ok(self.language())
            }
        }
    }

    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    /// The active output language, if any.
    pub fn language(&self) -> Option<String> {
        self.language.read().clone()
    }

    /// Translates `text`; without a translator the text comes back unchanged.
    pub fn translate(&self, text: &str, target_lang: &str, online: bool) -> String {
        self.translator
            .as_ref()
            .map_or_else(|| text.to_string(), |t| t.translate(text, target_lang, online))
    }

    fn localize(&self, text: String) -> String {
        let language = self.language.read().clone();
        match (language, &self.translator) {
            (Some(language), Some(translator)) => translator.translate(&text, &language, true),
            _ => text,
        }
    }
}

/// Maps a typed answer to an option index.
fn pick(answer: &str, labels: &[String], default: Option<usize>) -> Option<usize> {
    if answer.is_empty() {
        return Some(default.unwrap_or(0));
    }

    if let Ok(number) = answer.parse::<usize>() {
        return (1..=labels.len()).contains(&number).then(|| number - 1);
    }

    labels.iter().position(|label| label == answer)
}
