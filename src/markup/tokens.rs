//! Token registry: single-character delimiters bound to style specs.

use std::collections::BTreeMap;

use crate::error::ConsoleError;
use crate::style::StyleSpec;

/// Token table installed on construction: `*` yellow, `_` italic, `|` dim.
pub const DEFAULT_TOKENS: &[(char, &str)] = &[('*', "yellow"), ('_', "i"), ('|', "dim")];

/// Mapping from delimiter character to style spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRegistry {
    tokens: BTreeMap<char, StyleSpec>,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.merge(DEFAULT_TOKENS.iter().map(|&(token, spec)| (token, spec)));
        registry
    }
}

impl TokenRegistry {
    /// Creates a registry with no tokens.
    pub const fn empty() -> Self {
        Self {
            tokens: BTreeMap::new(),
        }
    }

    /// Adds or overwrites entries; tokens not named keep their style.
    pub fn merge<I, S>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<StyleSpec>,
    {
        for (token, spec) in mapping {
            self.tokens.insert(token, spec.into());
        }
    }

    /// Replaces the whole table.
    pub fn replace<I, S>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<StyleSpec>,
    {
        self.tokens.clear();
        self.merge(mapping);
    }

    pub fn get(&self, token: char) -> Option<&StyleSpec> {
        self.tokens.get(&token)
    }

    pub fn contains(&self, token: char) -> bool {
        self.tokens.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over `(token, spec)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &StyleSpec)> {
        self.tokens.iter().map(|(token, spec)| (*token, spec))
    }
}

/// Converts string-keyed entries (as found in config files) into tokens.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidArgument`] if a key is not exactly one character.
pub fn parse_token_map<'a, I>(entries: I) -> Result<Vec<(char, StyleSpec)>, ConsoleError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .map(|(key, spec)| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(token), None) => Ok((token, StyleSpec::new(spec))),
                _ => Err(ConsoleError::InvalidArgument(format!(
                    "color token '{key}' must be a single character"
                ))),
            }
        })
        .collect()
}
