//! Parser for the client-advertised preference header.
//!
//! The header is a comma-separated list of entries, each a language tag
//! optionally followed by `;`-separated attributes. A `q=<float>` attribute
//! sets the entry's quality; entries without one default to quality 1.0.
//!
//! Entries are keyed by quality, so two entries sharing a quality collide
//! and the last one wins. This is documented behavior, not a bug to fix.

use std::collections::BTreeMap;

use winnow::ascii::float;
use winnow::combinator::opt;
use winnow::prelude::*;
use winnow::token::take_while;

/// Quality assigned to entries without a parseable `q=` attribute.
const DEFAULT_QUALITY_MILLI: u32 = 1000;

/// Parse a header value into quality-keyed candidate tags.
///
/// Qualities are kept in milli-units (0..=1000) so they can serve as exact
/// map keys. Tags are normalized: trimmed, truncated to their first two
/// characters, lowercased. Validation happens later, at the negotiation
/// stage.
pub(crate) fn parse_header(value: &str) -> BTreeMap<u32, String> {
    let mut ranked = BTreeMap::new();

    for entry in value.split(',') {
        let mut pieces = entry.split(';');
        let Some(tag) = pieces.next() else {
            continue;
        };
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }

        // Malformed attributes are parse noise; fall back to the default.
        let quality = pieces
            .find_map(quality_attr)
            .unwrap_or(DEFAULT_QUALITY_MILLI);
        ranked.insert(quality, normalize_tag(tag));
    }

    ranked
}

/// Normalize a language tag to a short candidate code.
fn normalize_tag(tag: &str) -> String {
    tag.chars().take(2).map(|c| c.to_ascii_lowercase()).collect()
}

/// Parse one `;`-separated attribute as a `q=<float>` quality, in
/// milli-units. Returns None for anything else.
fn quality_attr(attr: &str) -> Option<u32> {
    quality.parse(attr.trim()).ok()
}

/// Parse `q=<float>`, clamped to [0.0, 1.0].
fn quality(input: &mut &str) -> ModalResult<u32> {
    let _ = 'q'.parse_next(input)?;
    let _ = opt(ws).parse_next(input)?;
    let _ = '='.parse_next(input)?;
    let _ = opt(ws).parse_next(input)?;
    let q: f64 = float.parse_next(input)?;
    Ok((q.clamp(0.0, 1.0) * 1000.0).round() as u32)
}

/// Parse whitespace around the `=`.
fn ws<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_whitespace()).parse_next(input)
}
