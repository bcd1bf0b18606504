//! # x-console - Rich console output for CLIs
//!
//! `x-console` layers human-friendly formatting over a terminal: inline
//! color tokens, `{name}` templates, prompts and selection menus, and a
//! spinner that drives long-running work. Output can optionally be
//! translated into an active language through an OpenAI-compatible API.
//!
//! ## Quick Start
//!
//! ```no_run
//! use x_console::{Console, ConsoleConfig, params};
//!
//! # fn main() -> Result<(), x_console::ConsoleError> {
//! let console = Console::new(ConsoleConfig::default());
//! console.echo("*Welcome* to _x-console_", &params!())?;
//! let name = console.prompt("What's your name?", Some("Guest"))?;
//! console.echo("Nice to meet you, *{name}*!", &params! { "name" => name })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Markup
//!
//! A token character opens a span and the same character closes it:
//! `*yellow*`, `_italic_` and `|dim|` by default. Spans do not nest, and
//! unregistered or unpaired tokens print literally.
//!
//! ## Configuration
//!
//! The `xc` binary reads `~/.config/x-console/config.toml`:
//!
//! ```toml
//! [console]
//! debug = true
//! debug_prefix = "TEST"
//!
//! [tokens]
//! "#" = "blue"
//!
//! [translation]
//! offline = "ollama"
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434"
//! model = "gemma3:12b"
//! ```

/// Translation cache using `SQLite`.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// The `Console` facade.
pub mod console;

/// Error types.
pub mod error;

/// Color tokens, templates and the span scanner.
pub mod markup;

/// Global output configuration and line emitters.
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Spinner-driven process runner.
pub mod process;

/// Interactive input back ends.
pub mod prompt;

/// Style specs and their resolution to terminal styles.
pub mod style;

/// Translation collaborator and HTTP back end.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

pub use console::{Console, ConsoleConfig};
pub use error::{ConsoleError, FormatError};
pub use markup::Params;
pub use process::ProgressStep;
