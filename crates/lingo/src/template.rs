//! Message template scanner and positional substitution.
//!
//! Templates are plain text with `%s` placeholders. `%%` escapes a literal
//! percent sign. Substitution is positional, left to right. No escaping of
//! the output is performed; that is the caller's responsibility.

use winnow::combinator::{alt, repeat};
use winnow::prelude::*;
use winnow::token::any;

/// A piece of a scanned template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted verbatim.
    Literal(String),
    /// A `%s` placeholder consuming the next context value.
    Placeholder,
}

/// A scanned message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Segments in source order, adjacent literals merged.
    pub segments: Vec<Segment>,
}

impl Template {
    /// Number of placeholders in the template.
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder))
            .count()
    }

    /// Substitute values positionally, left to right.
    ///
    /// Placeholders beyond the last value render as literal `%s`; surplus
    /// values are ignored.
    pub fn substitute(&self, values: &[String]) -> String {
        let mut out = String::new();
        let mut next = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder => {
                    if let Some(value) = values.get(next) {
                        out.push_str(value);
                        next += 1;
                    } else {
                        out.push_str("%s");
                    }
                }
            }
        }
        out
    }
}

/// Scan a template string into segments.
///
/// Scanning is total: every input is a valid template, since any character
/// outside the two `%` forms is a literal.
pub fn parse_template(input: &str) -> Template {
    let segments: Vec<Segment> = repeat(0.., segment)
        .parse(input)
        .unwrap_or_else(|_| vec![Segment::Literal(input.to_string())]);
    Template {
        segments: merge_literals(segments),
    }
}

/// Parse a single template segment.
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((
        "%%".value(Segment::Literal("%".to_string())),
        "%s".value(Segment::Placeholder),
        any.map(|c: char| Segment::Literal(c.to_string())),
    ))
    .parse_next(input)
}

/// Merge adjacent literal segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            Segment::Placeholder => result.push(Segment::Placeholder),
        }
    }

    result
}
