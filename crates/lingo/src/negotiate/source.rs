use std::collections::HashMap;

use bon::Builder;

/// Priority weight for an explicit, caller-forced locale.
pub const PRIORITY_FORCED: u32 = 10_000;
/// Priority weight for the per-request parameter source.
pub const PRIORITY_REQUEST_PARAM: u32 = 1_000;
/// Priority weight for the session source.
pub const PRIORITY_SESSION: u32 = 100;
/// Priority weight for the cookie source.
pub const PRIORITY_COOKIE: u32 = 10;

/// A named negotiation origin carrying a raw candidate value.
///
/// Sources are transient: they exist only for the duration of a single
/// `detect` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationSource {
    /// Origin name, e.g. `"cookie"`.
    pub name: &'static str,
    /// Fixed priority weight; higher wins.
    pub priority: u32,
    /// Raw candidate value, unvalidated.
    pub raw: Option<String>,
}

/// The negotiation inputs for one request, passed in explicitly.
///
/// The engine never reads ambient request state. Callers collect the
/// candidate values from wherever they live (query string, session store,
/// cookie jar, `Accept-Language`-style header) and hand them over as plain
/// strings. [`SourceSet::from_request`] covers the common case of three
/// opaque key-value maps read under a single parameter name.
///
/// # Example
///
/// ```
/// use lingo::SourceSet;
///
/// let sources = SourceSet::builder()
///     .request_param("en")
///     .cookie("fr")
///     .build();
/// assert_eq!(sources.request_param.as_deref(), Some("en"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct SourceSet {
    /// Explicit override; outranks every other source.
    pub forced: Option<String>,
    /// Per-request parameter value.
    pub request_param: Option<String>,
    /// Session-held value.
    pub session: Option<String>,
    /// Cookie-held value.
    pub cookie: Option<String>,
    /// Client-advertised preference header, consulted only when every
    /// discrete source above is empty.
    pub header: Option<String>,
}

impl SourceSet {
    /// Build a source set from three opaque key-value maps plus a header
    /// value, all keyed by `param_name`.
    pub fn from_request(
        param_name: &str,
        params: &HashMap<String, String>,
        session: &HashMap<String, String>,
        cookies: &HashMap<String, String>,
        header: Option<&str>,
    ) -> Self {
        Self {
            forced: None,
            request_param: params.get(param_name).cloned(),
            session: session.get(param_name).cloned(),
            cookie: cookies.get(param_name).cloned(),
            header: header.map(str::to_string),
        }
    }

    /// The discrete sources in priority order, header excluded.
    pub fn discrete(&self) -> [NegotiationSource; 4] {
        [
            NegotiationSource {
                name: "forced",
                priority: PRIORITY_FORCED,
                raw: self.forced.clone(),
            },
            NegotiationSource {
                name: "request-parameter",
                priority: PRIORITY_REQUEST_PARAM,
                raw: self.request_param.clone(),
            },
            NegotiationSource {
                name: "session",
                priority: PRIORITY_SESSION,
                raw: self.session.clone(),
            },
            NegotiationSource {
                name: "cookie",
                priority: PRIORITY_COOKIE,
                raw: self.cookie.clone(),
            },
        ]
    }
}
