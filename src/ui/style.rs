//! Fixed semantic styles for console chrome (tags, glyphs, listings).
//!
//! Provides color and formatting helpers using owo-colors. Markup tokens
//! are styled through [`crate::style::StyleSpec`] instead.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::style::StyleSpec;

/// Style spec applied to the whole line by `warn`.
pub const WARNING_SPEC: &str = "yellow";

/// Style spec applied to the whole line by `echo_dim`.
pub const DIM_SPEC: &str = "dim";

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for section headers
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Style for secondary/supplementary info (e.g., language names)
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Style for success glyphs
    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    /// Style for error glyphs and messages
    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    /// Style for the warning tag
    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow().bold())
    }

    /// Style for the debug tag
    pub fn debug_tag<T: Display>(text: T) -> String {
        format!("{}", text.magenta().dimmed())
    }

    /// Style for language codes
    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Line style for `warn`
    pub fn warning_spec() -> StyleSpec {
        StyleSpec::new(WARNING_SPEC)
    }

    /// Line style for `echo_dim`
    pub fn dim_spec() -> StyleSpec {
        StyleSpec::new(DIM_SPEC)
    }
}
