//! Translation collaborator.
//!
//! The console only sees the [`Translate`] contract: translation never fails
//! from the caller's point of view and falls back to the input text.
//! [`TranslationService`] implements it over pluggable [`Backend`]s, a
//! [`LanguageDetector`] and an optional TTL cache.

mod client;
mod language;
mod prompt;
mod service;

use anyhow::Result;

pub use client::HttpBackend;
pub use language::{
    SUPPORTED_LANGUAGES, canonical_code, language_lines, language_name, print_languages,
    validate_language,
};
pub use service::{DEFAULT_CACHE_TTL, TranslationService};

/// What the console needs from a translation subsystem.
pub trait Translate: Send + Sync {
    /// Translates `text` into `target_lang`; returns `text` unchanged on any failure.
    fn translate(&self, text: &str, target_lang: &str, online: bool) -> String;

    /// Detects the language of `text` as a lowercase ISO 639-1 code.
    fn detect_language(&self, text: &str) -> Result<String>;
}

/// One concrete translation engine.
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<String>;
}

/// Filter directives that keep the HTTP stack quiet below `warn`.
///
/// Applied when the binary installs its subscriber, never at load time.
pub const fn log_directives() -> &'static [&'static str] {
    &["reqwest=warn", "hyper=warn", "hyper_util=warn", "rustls=warn"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directives_parse() {
        for directive in log_directives() {
            assert!(
                directive.parse::<tracing_subscriber::filter::Directive>().is_ok(),
                "{directive}"
            );
        }
    }
}
