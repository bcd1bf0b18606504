//! Left-to-right span scanner.
//!
//! A registered token opens a span; the same token closes it. Only one span
//! is open at a time: other tokens inside an open span are literal text.
//! Unregistered tokens and spans left open at the end of the line are
//! emitted verbatim, delimiter included.

use crate::markup::TokenRegistry;
use crate::style::StyleSpec;

/// A run of text with an optional style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Option<StyleSpec>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: StyleSpec) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

#[derive(Clone, Copy)]
struct OpenSpan {
    token: char,
    start: usize,
}

/// Splits `text` into plain and styled segments.
pub fn scan(text: &str, tokens: &TokenRegistry) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut open: Option<OpenSpan> = None;

    for (i, c) in text.char_indices() {
        match open {
            Some(span) if span.token == c => {
                push_plain(&mut segments, &text[plain_start..span.start]);
                let inner = &text[span.start + c.len_utf8()..i];
                if let (false, Some(style)) = (inner.is_empty(), tokens.get(c)) {
                    segments.push(Segment::styled(inner, style.clone()));
                }
                plain_start = i + c.len_utf8();
                open = None;
            }
            Some(_) => {}
            None if tokens.contains(c) => open = Some(OpenSpan { token: c, start: i }),
            None => {}
        }
    }

    // an unclosed span falls back to literal text
    push_plain(&mut segments, &text[plain_start..]);
    segments
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(Segment { text: last, style: None }) => last.push_str(text),
        _ => segments.push(Segment::plain(text)),
    }
}

/// Concatenates segment text, dropping styles.
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TokenRegistry {
        TokenRegistry::default()
    }

    #[test]
    fn test_plain_text_single_segment() {
        let segments = scan("hello world", &registry());
        assert_eq!(segments, vec![Segment::plain("hello world")]);
    }

    #[test]
    fn test_balanced_span() {
        let segments = scan("a *b* c", &registry());
        assert_eq!(
            segments,
            vec![
                Segment::plain("a "),
                Segment::styled("b", StyleSpec::new("yellow")),
                Segment::plain(" c"),
            ]
        );
    }

    #[test]
    fn test_multiple_token_kinds() {
        let segments = scan("*yellow* text, _italic_ text, and |dim| text", &registry());
        let styled: Vec<_> = segments
            .iter()
            .filter_map(|s| s.style.as_ref().map(|st| (s.text.as_str(), st.as_str())))
            .collect();
        assert_eq!(
            styled,
            vec![("yellow", "yellow"), ("italic", "i"), ("dim", "dim")]
        );
        assert_eq!(
            plain_text(&segments),
            "yellow text, italic text, and dim text"
        );
    }

    #[test]
    fn test_unpaired_token_is_literal() {
        let segments = scan("a*b", &registry());
        assert_eq!(segments, vec![Segment::plain("a*b")]);
    }

    #[test]
    fn test_third_token_after_pair_is_literal() {
        let segments = scan("*a* b*c", &registry());
        assert_eq!(plain_text(&segments), "a b*c");
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_unregistered_token_is_literal() {
        let segments = scan("#blue#", &registry());
        assert_eq!(segments, vec![Segment::plain("#blue#")]);
    }

    #[test]
    fn test_nested_token_is_literal_inside_span() {
        let segments = scan("*a _b_ c*", &registry());
        assert_eq!(
            segments,
            vec![Segment::styled("a _b_ c", StyleSpec::new("yellow"))]
        );
    }

    #[test]
    fn test_crossing_spans_do_not_nest() {
        // `*` opens, `_` is literal, `*` closes, the last `_` is unpaired
        let segments = scan("*a_b*c_", &registry());
        assert_eq!(
            segments,
            vec![
                Segment::styled("a_b", StyleSpec::new("yellow")),
                Segment::plain("c_"),
            ]
        );
    }

    #[test]
    fn test_adjacent_spans() {
        let segments = scan("*a**b*", &registry());
        assert_eq!(
            segments,
            vec![
                Segment::styled("a", StyleSpec::new("yellow")),
                Segment::styled("b", StyleSpec::new("yellow")),
            ]
        );
    }

    #[test]
    fn test_empty_span_is_dropped() {
        let segments = scan("x**y", &registry());
        assert_eq!(segments, vec![Segment::plain("xy")]);
    }

    #[test]
    fn test_unclosed_span_keeps_following_text() {
        let segments = scan("ok *done* and *open", &registry());
        assert_eq!(plain_text(&segments), "ok done and *open");
        assert_eq!(segments.last(), Some(&Segment::plain(" and *open")));
    }

    #[test]
    fn test_multibyte_tokens_and_text() {
        let mut tokens = TokenRegistry::empty();
        tokens.merge([('§', "red")]);
        let segments = scan("→ §héllo§ ✓", &tokens);
        assert_eq!(
            segments,
            vec![
                Segment::plain("→ "),
                Segment::styled("héllo", StyleSpec::new("red")),
                Segment::plain(" ✓"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(scan("", &registry()).is_empty());
    }
}
