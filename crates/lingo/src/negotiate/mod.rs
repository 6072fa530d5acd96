//! Locale negotiation: ranking candidate locales from competing sources.
//!
//! Candidates come from discrete sources (explicit override, request
//! parameter, session, cookie) ranked by fixed priority. The preference
//! header is a fallback negotiation path: it is parsed only when every
//! discrete source is empty, not counted as an additional vote. The
//! configured fallback locale is always appended, so the negotiated list
//! is never empty.

mod header;
mod source;

pub use source::{
    NegotiationSource, PRIORITY_COOKIE, PRIORITY_FORCED, PRIORITY_REQUEST_PARAM, PRIORITY_SESSION,
    SourceSet,
};

use std::collections::BTreeMap;

use crate::types::LocaleCode;

/// Ranks candidate locales from a [`SourceSet`] into an ordered preference
/// list.
///
/// # Example
///
/// ```
/// use lingo::{LocaleCode, Negotiator, SourceSet};
///
/// let negotiator = Negotiator::new(LocaleCode::parse("fra").unwrap());
/// let sources = SourceSet::builder()
///     .request_param("en")
///     .cookie("fr")
///     .build();
///
/// let order = negotiator.detect(&sources);
/// let codes: Vec<&str> = order.iter().map(|c| c.as_str()).collect();
/// assert_eq!(codes, ["en", "fr", "fra"]);
/// ```
#[derive(Debug, Clone)]
pub struct Negotiator {
    fallback: LocaleCode,
}

impl Negotiator {
    /// Create a negotiator with the given fallback locale.
    pub fn new(fallback: LocaleCode) -> Self {
        Self { fallback }
    }

    /// The fallback locale appended to every negotiated list.
    pub fn fallback(&self) -> &LocaleCode {
        &self.fallback
    }

    /// Rank the candidates from `sources` into an ordered preference list.
    ///
    /// Candidates failing the locale pattern are dropped silently. Values
    /// are deduplicated, keeping the highest-priority occurrence. The
    /// result always contains the fallback locale and is never empty.
    pub fn detect(&self, sources: &SourceSet) -> Vec<LocaleCode> {
        let mut ranked: BTreeMap<u32, String> = BTreeMap::new();

        for source in sources.discrete() {
            if let Some(raw) = source.raw {
                ranked.insert(source.priority, raw);
            }
        }

        // The header is consulted only when the discrete sources yielded
        // nothing at all.
        if ranked.is_empty() {
            if let Some(value) = sources.header.as_deref() {
                ranked = header::parse_header(value);
            }
        }

        let mut order: Vec<LocaleCode> = Vec::with_capacity(ranked.len() + 1);
        for (_, raw) in ranked.into_iter().rev() {
            let Ok(code) = LocaleCode::parse(&raw) else {
                continue;
            };
            if !order.contains(&code) {
                order.push(code);
            }
        }

        if !order.contains(&self.fallback) {
            order.push(self.fallback.clone());
        }

        order
    }
}
