//! Named `{placeholder}` substitution.

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::error::FormatError;

/// Named parameters for a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, storing its display form.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.0.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Builds [`Params`] from `name => value` pairs.
///
/// ```
/// use x_console::params;
///
/// let params = params! { "name" => "World", "count" => 3 };
/// assert_eq!(params.get("count"), Some("3"));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::markup::Params::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::markup::Params::new()$(.with($name, $value))+
    };
}

/// Replaces every `{name}` in `template` with its parameter value.
///
/// `{{` and `}}` produce literal braces. Substituted values are inserted
/// verbatim and are not scanned for further placeholders.
///
/// # Errors
///
/// Fails on a name missing from `params` or on an unbalanced brace.
pub fn substitute(template: &str, params: &Params) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template.char_indices().peekable();

    while let Some((position, c)) = rest.next() {
        match c {
            '{' if rest.next_if(|&(_, next)| next == '{').is_some() => out.push('{'),
            '{' => {
                let start = position + 1;
                let end = loop {
                    match rest.next() {
                        Some((i, '}')) => break i,
                        Some((_, '{')) | None => {
                            return Err(FormatError::UnclosedBrace { position });
                        }
                        Some(_) => {}
                    }
                };
                let name = template[start..end].trim();
                let value = params
                    .get(name)
                    .ok_or_else(|| FormatError::MissingParameter {
                        name: name.to_string(),
                    })?;
                out.push_str(value);
            }
            '}' if rest.next_if(|&(_, next)| next == '}').is_some() => out.push('}'),
            '}' => return Err(FormatError::UnmatchedBrace { position }),
            _ => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_named_parameter() {
        let params = Params::new().with("name", "World");
        assert_eq!(substitute("Hello {name}", &params).unwrap(), "Hello World");
    }

    #[test]
    fn test_substitute_uses_display_form() {
        let params = Params::new().with("step", 2).with("total", 5);
        assert_eq!(
            substitute("Step {step} of {total}", &params).unwrap(),
            "Step 2 of 5"
        );
    }

    #[test]
    fn test_substitute_repeated_name() {
        let params = Params::new().with("x", "ab");
        assert_eq!(substitute("{x}-{x}", &params).unwrap(), "ab-ab");
    }

    #[test]
    fn test_substitute_without_placeholders() {
        assert_eq!(
            substitute("Operation completed successfully!", &Params::new()).unwrap(),
            "Operation completed successfully!"
        );
    }

    #[test]
    fn test_missing_parameter_is_an_error() {
        let result = substitute("Hello {missing}", &Params::new());
        assert_eq!(
            result,
            Err(FormatError::MissingParameter {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_escaped_braces() {
        let params = Params::new().with("v", 1);
        assert_eq!(substitute("{{v}} = {v}", &params).unwrap(), "{v} = 1");
    }

    #[test]
    fn test_unclosed_brace() {
        let result = substitute("oops {name", &Params::new().with("name", "x"));
        assert_eq!(result, Err(FormatError::UnclosedBrace { position: 5 }));
    }

    #[test]
    fn test_unmatched_closing_brace() {
        let result = substitute("a } b", &Params::new());
        assert_eq!(result, Err(FormatError::UnmatchedBrace { position: 2 }));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let params = Params::new().with("a", "{b}");
        assert_eq!(substitute("<{a}>", &params).unwrap(), "<{b}>");
    }

    #[test]
    fn test_unicode_text_around_placeholders() {
        let params = Params::new().with("who", "мир");
        assert_eq!(substitute("• привет {who} 🌍", &params).unwrap(), "• привет мир 🌍");
    }

    #[test]
    fn test_params_macro() {
        let params = crate::params! { "name" => "World", "n" => 3 };
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("n"), Some("3"));
        assert!(crate::params! {}.is_empty());
    }

    #[test]
    fn test_params_from_iterator() {
        let params: Params = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(params.get("b"), Some("2"));
    }
}
