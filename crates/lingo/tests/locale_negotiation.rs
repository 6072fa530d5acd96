//! Integration tests for locale negotiation.

use lingo::{LocaleCode, Negotiator, SourceSet};

fn negotiator(fallback: &str) -> Negotiator {
    Negotiator::new(LocaleCode::parse(fallback).unwrap())
}

fn codes(order: &[LocaleCode]) -> Vec<&str> {
    order.iter().map(LocaleCode::as_str).collect()
}

// =========================================================================
// Discrete Sources
// =========================================================================

#[test]
fn discrete_sources_rank_by_priority() {
    let sources = SourceSet::builder()
        .cookie("de")
        .session("ru")
        .request_param("en")
        .build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["en", "ru", "de", "fra"]);
}

#[test]
fn forced_outranks_everything() {
    let sources = SourceSet::builder()
        .forced("eo")
        .request_param("en")
        .session("ru")
        .cookie("de")
        .build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["eo", "en", "ru", "de", "fra"]);
}

#[test]
fn request_and_cookie_scenario() {
    let sources = SourceSet::builder()
        .request_param("en")
        .cookie("fr")
        .build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["en", "fr", "fra"]);
}

#[test]
fn empty_sources_yield_only_fallback() {
    let order = negotiator("fra").detect(&SourceSet::default());
    assert_eq!(codes(&order), ["fra"]);
}

#[test]
fn duplicate_values_deduplicate_keeping_highest() {
    let sources = SourceSet::builder()
        .request_param("en")
        .session("en")
        .cookie("de")
        .build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["en", "de", "fra"]);
}

#[test]
fn illegal_candidates_are_dropped_silently() {
    let sources = SourceSet::builder()
        .request_param("en/../../etc")
        .session("r u")
        .cookie("de")
        .build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["de", "fra"]);
}

#[test]
fn underscore_and_dash_are_legal() {
    let sources = SourceSet::builder()
        .request_param("en-US")
        .session("pt_BR")
        .build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["en-US", "pt_BR", "fra"]);
}

// =========================================================================
// Header Fallback Path
// =========================================================================

#[test]
fn header_orders_by_quality() {
    let sources = SourceSet::builder().header("fr;q=0.8,en;q=0.9").build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["en", "fr", "fra"]);
}

#[test]
fn header_default_quality_is_highest() {
    let sources = SourceSet::builder().header("de,en;q=0.9,fr;q=0.5").build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["de", "en", "fr", "fra"]);
}

#[test]
fn header_ignored_when_discrete_source_present() {
    let sources = SourceSet::builder()
        .cookie("de")
        .header("en;q=0.9,fr;q=0.8")
        .build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["de", "fra"]);
}

#[test]
fn header_tags_normalize_to_two_characters() {
    let sources = SourceSet::builder().header("en-US,fr-CA;q=0.5").build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["en", "fr", "fra"]);
}

#[test]
fn equal_qualities_collide_last_wins() {
    // Two entries sharing a quality overwrite each other; documented
    // behavior of the quality-keyed candidate list.
    let sources = SourceSet::builder().header("de;q=0.5,fr;q=0.5").build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["fr", "fra"]);
}

#[test]
fn malformed_quality_falls_back_to_default() {
    let sources = SourceSet::builder().header("de;q=abc,en;q=0.2").build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["de", "en", "fra"]);
}

#[test]
fn header_whitespace_is_trimmed() {
    let sources = SourceSet::builder().header(" en ; q=0.7 , fr ; q=0.9 ").build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["fr", "en", "fra"]);
}

// =========================================================================
// Invariants
// =========================================================================

#[test]
fn fallback_is_always_last_and_list_never_empty() {
    let cases = [
        SourceSet::default(),
        SourceSet::builder().request_param("!!!").build(),
        SourceSet::builder().header(";;;,").build(),
        SourceSet::builder().cookie("de").build(),
    ];

    for sources in cases {
        let order = negotiator("fra").detect(&sources);
        assert!(!order.is_empty());
        assert_eq!(order.last().map(LocaleCode::as_str), Some("fra"));
    }
}

#[test]
fn fallback_not_duplicated_when_also_a_candidate() {
    let sources = SourceSet::builder().request_param("fra").build();

    let order = negotiator("fra").detect(&sources);
    assert_eq!(codes(&order), ["fra"]);
}

// =========================================================================
// Source Construction
// =========================================================================

#[test]
fn from_request_reads_maps_by_param_name() {
    use std::collections::HashMap;

    let params = HashMap::from([("lang".to_string(), "en".to_string())]);
    let session = HashMap::new();
    let cookies = HashMap::from([("lang".to_string(), "fr".to_string())]);

    let sources = SourceSet::from_request("lang", &params, &session, &cookies, Some("de"));
    assert_eq!(sources.request_param.as_deref(), Some("en"));
    assert_eq!(sources.session, None);
    assert_eq!(sources.cookie.as_deref(), Some("fr"));
    assert_eq!(sources.header.as_deref(), Some("de"));
}
