//! Token-based rich text.
//!
//! Rendering a template is two passes: `{name}` placeholders are substituted
//! first, then the result is scanned for token-delimited spans such as
//! `*highlight*` or `_italic_`.

mod scanner;
mod template;
mod tokens;

use owo_colors::OwoColorize;

pub use scanner::{Segment, plain_text, scan};
pub use template::{Params, substitute};
pub use tokens::{DEFAULT_TOKENS, TokenRegistry, parse_token_map};

use crate::error::FormatError;
use crate::style::StyleSpec;

/// How segments are colored when painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// Each span gets its token's style.
    Tokens,
    /// The whole line gets one style; span styles are discarded.
    Uniform(StyleSpec),
    /// No styling at all.
    Plain,
}

/// Substitutes parameters and scans the result into segments.
///
/// # Errors
///
/// Returns a [`FormatError`] if substitution fails.
pub fn render(
    template: &str,
    params: &Params,
    tokens: &TokenRegistry,
) -> Result<Vec<Segment>, FormatError> {
    let text = substitute(template, params)?;
    Ok(scan(&text, tokens))
}

/// Writes segments into a single string.
///
/// With `color` off the result is plain text regardless of `paint`.
pub fn paint(segments: &[Segment], paint: &Paint, color: bool) -> String {
    if !color {
        return plain_text(segments);
    }

    match paint {
        Paint::Plain => plain_text(segments),
        Paint::Uniform(spec) => plain_text(segments).style(spec.resolve()).to_string(),
        Paint::Tokens => segments
            .iter()
            .map(|segment| match &segment.style {
                Some(spec) => segment.text.style(spec.resolve()).to_string(),
                None => segment.text.clone(),
            })
            .collect(),
    }
}
