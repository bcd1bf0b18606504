//! Errors surfaced to callers of the console facade.

use thiserror::Error;

/// Errors raised while substituting `{name}` placeholders in a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing template parameter '{name}'")]
    MissingParameter { name: String },

    #[error("unclosed '{{' at byte {position}")]
    UnclosedBrace { position: usize },

    #[error("unmatched '}}' at byte {position}")]
    UnmatchedBrace { position: usize },
}

/// Errors returned by [`Console`](crate::console::Console) operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Input unavailable: the interactive input stream is closed")]
    InputUnavailable,

    #[error("Process failed: {0}")]
    ProcessSource(#[source] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// Returns the error raised by a progress source, if this is one.
    pub const fn source_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::ProcessSource(err) => Some(err),
            _ => None,
        }
    }
}
