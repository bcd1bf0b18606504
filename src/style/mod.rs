//! Style specifications for markup tokens.
//!
//! A [`StyleSpec`] is a space-separated list of attribute names such as
//! `"bold red"` or `"cyan underline"`. Names are looked up in a closed table
//! of supported attributes; unknown names are ignored so a malformed spec
//! never breaks rendering.

use std::fmt;

use owo_colors::AnsiColors;
use tracing::trace;

/// A single terminal text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Foreground color.
    Fg(AnsiColors),
    /// Background color (written as `on <color>`).
    Bg(AnsiColors),
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
}

/// A named entry in the attribute table.
#[derive(Debug, Clone, Copy)]
pub struct AttributeName {
    /// The name as written in a style spec.
    pub name: &'static str,
    /// The attribute it resolves to.
    pub attribute: Attribute,
}

const fn entry(name: &'static str, attribute: Attribute) -> AttributeName {
    AttributeName { name, attribute }
}

/// All attribute names understood by [`StyleSpec`].
pub const ATTRIBUTES: &[AttributeName] = &[
    entry("black", Attribute::Fg(AnsiColors::Black)),
    entry("red", Attribute::Fg(AnsiColors::Red)),
    entry("green", Attribute::Fg(AnsiColors::Green)),
    entry("yellow", Attribute::Fg(AnsiColors::Yellow)),
    entry("blue", Attribute::Fg(AnsiColors::Blue)),
    entry("magenta", Attribute::Fg(AnsiColors::Magenta)),
    entry("cyan", Attribute::Fg(AnsiColors::Cyan)),
    entry("white", Attribute::Fg(AnsiColors::White)),
    entry("grey", Attribute::Fg(AnsiColors::BrightBlack)),
    entry("gray", Attribute::Fg(AnsiColors::BrightBlack)),
    entry("bright_black", Attribute::Fg(AnsiColors::BrightBlack)),
    entry("bright_red", Attribute::Fg(AnsiColors::BrightRed)),
    entry("bright_green", Attribute::Fg(AnsiColors::BrightGreen)),
    entry("bright_yellow", Attribute::Fg(AnsiColors::BrightYellow)),
    entry("bright_blue", Attribute::Fg(AnsiColors::BrightBlue)),
    entry("bright_magenta", Attribute::Fg(AnsiColors::BrightMagenta)),
    entry("bright_cyan", Attribute::Fg(AnsiColors::BrightCyan)),
    entry("bright_white", Attribute::Fg(AnsiColors::BrightWhite)),
    entry("bold", Attribute::Bold),
    entry("b", Attribute::Bold),
    entry("dim", Attribute::Dim),
    entry("italic", Attribute::Italic),
    entry("i", Attribute::Italic),
    entry("underline", Attribute::Underline),
    entry("u", Attribute::Underline),
    entry("blink", Attribute::Blink),
    entry("reverse", Attribute::Reverse),
    entry("r", Attribute::Reverse),
    entry("conceal", Attribute::Hidden),
    entry("strike", Attribute::Strikethrough),
    entry("s", Attribute::Strikethrough),
];

/// Looks up an attribute by name (case-insensitive).
pub fn lookup(name: &str) -> Option<Attribute> {
    ATTRIBUTES
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(name))
        .map(|a| a.attribute)
}

/// A style specification, e.g. `"bold red"` or `"white on blue"`.
///
/// The spec keeps its source text and is resolved on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleSpec(String);

impl StyleSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the recognised attributes in spec order.
    ///
    /// `on` makes the following color a background color.
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        let mut background = false;

        for word in self.0.split_whitespace() {
            if word.eq_ignore_ascii_case("on") {
                background = true;
                continue;
            }

            match (lookup(word), background) {
                (Some(Attribute::Fg(color)), true) => attributes.push(Attribute::Bg(color)),
                (Some(attribute), _) => attributes.push(attribute),
                (None, _) => trace!(attribute = word, spec = %self.0, "ignoring unknown style attribute"),
            }
            background = false;
        }

        attributes
    }

    /// Resolves the spec to a concrete terminal style.
    pub fn resolve(&self) -> owo_colors::Style {
        self.attributes()
            .into_iter()
            .fold(owo_colors::Style::new(), apply)
    }
}

fn apply(style: owo_colors::Style, attribute: Attribute) -> owo_colors::Style {
    match attribute {
        Attribute::Fg(color) => style.color(color),
        Attribute::Bg(color) => style.on_color(color),
        Attribute::Bold => style.bold(),
        Attribute::Dim => style.dimmed(),
        Attribute::Italic => style.italic(),
        Attribute::Underline => style.underline(),
        Attribute::Blink => style.blink(),
        Attribute::Reverse => style.reversed(),
        Attribute::Hidden => style.hidden(),
        Attribute::Strikethrough => style.strikethrough(),
    }
}

impl fmt::Display for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StyleSpec {
    fn from(spec: &str) -> Self {
        Self::new(spec)
    }
}

impl From<String> for StyleSpec {
    fn from(spec: String) -> Self {
        Self(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_lookup_known_names() {
        assert_eq!(lookup("yellow"), Some(Attribute::Fg(AnsiColors::Yellow)));
        assert_eq!(lookup("i"), Some(Attribute::Italic));
        assert_eq!(lookup("dim"), Some(Attribute::Dim));
        assert_eq!(lookup("BOLD"), Some(Attribute::Bold));
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert!(lookup("sparkly").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_attributes_preserve_order() {
        let spec = StyleSpec::new("bold red");
        assert_eq!(
            spec.attributes(),
            vec![Attribute::Bold, Attribute::Fg(AnsiColors::Red)]
        );
    }

    #[test]
    fn test_attributes_background() {
        let spec = StyleSpec::new("white on blue");
        assert_eq!(
            spec.attributes(),
            vec![
                Attribute::Fg(AnsiColors::White),
                Attribute::Bg(AnsiColors::Blue)
            ]
        );
    }

    #[test]
    fn test_unknown_attributes_are_ignored() {
        let spec = StyleSpec::new("green sparkly  italic");
        assert_eq!(
            spec.attributes(),
            vec![Attribute::Fg(AnsiColors::Green), Attribute::Italic]
        );
    }

    #[test]
    fn test_empty_spec_resolves_to_plain_text() {
        let spec = StyleSpec::new("");
        assert!(spec.attributes().is_empty());
        assert_eq!(format!("{}", "x".style(spec.resolve())), "x");
    }

    #[test]
    fn test_resolve_matches_builder_style() {
        let spec = StyleSpec::new("yellow");
        let expected = format!("{}", "x".style(owo_colors::Style::new().yellow()));
        assert_eq!(format!("{}", "x".style(spec.resolve())), expected);
    }

    #[test]
    fn test_resolved_style_emits_escape_codes() {
        let rendered = format!("{}", "x".style(StyleSpec::new("bold red").resolve()));
        assert!(rendered.contains("\u{1b}["));
        assert!(rendered.contains('x'));
    }

    #[test]
    fn test_display_returns_source_text() {
        assert_eq!(StyleSpec::from("cyan underline").to_string(), "cyan underline");
    }
}
