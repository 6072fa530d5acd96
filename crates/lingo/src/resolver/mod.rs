//! The translation resolver: the user-facing facade over negotiation,
//! catalog loading, caching, and substitution.

mod context;
mod error;

pub use error::InitError;

use std::collections::HashMap;
use std::path::PathBuf;

use bon::Builder;

use crate::cache::{CacheWarning, CatalogCache};
use crate::catalog::{Catalog, CatalogLoader};
use crate::negotiate::{Negotiator, SourceSet};
use crate::resolver::context::ResolveContext;
use crate::template::parse_template;
use crate::types::{Arg, LocaleCode};

/// State established by a successful `init`.
#[derive(Debug)]
struct Active {
    locale: LocaleCode,
    catalog: Catalog,
    artifact_path: PathBuf,
    warnings: Vec<CacheWarning>,
}

/// Resolves message keys into localized, substituted strings.
///
/// A resolver is request-scoped: build one, initialize it once against the
/// request's negotiation sources, then look up messages with [`l`].
/// Initialization is one-shot — a second `init` on the same instance fails
/// fast rather than silently recompiling.
///
/// # Example
///
/// ```no_run
/// use lingo::{Resolver, SourceSet};
///
/// let mut resolver = Resolver::builder()
///     .path_template("locale/{locale}/user_interface.json")
///     .cache_dir("locale/cache")
///     .build();
///
/// let sources = SourceSet::builder().request_param("en").build();
/// resolver.init(&sources)?;
///
/// let greeting = resolver.l("GREETING", &["World".into()]);
/// # Ok::<(), lingo::InitError>(())
/// ```
///
/// [`l`]: Resolver::l
#[derive(Debug, Builder)]
#[builder(on(String, into))]
pub struct Resolver {
    /// Template for locating a locale's source catalog; the `{locale}`
    /// token is substituted with the resolved locale code.
    #[builder(default = "locale/{locale}/user_interface.json".to_string())]
    path_template: String,

    /// Directory holding compiled cache artifacts.
    #[builder(default = PathBuf::from("locale/cache"), into)]
    cache_dir: PathBuf,

    /// Namespace prefix for artifact file names.
    #[builder(default = "lingo".to_string())]
    cache_prefix: String,

    /// Locale consulted to fill gaps and appended as the lowest-priority
    /// negotiation candidate.
    #[builder(default)]
    fallback_locale: LocaleCode,

    /// Whether the fallback locale's catalog is merged underneath the
    /// resolved locale's catalog.
    #[builder(default)]
    merge_fallback: bool,

    /// Parameter name under which the key-value sources are read.
    #[builder(default = "lang".to_string())]
    param_name: String,

    #[builder(skip)]
    active: Option<Active>,
}

impl Resolver {
    /// The configured negotiation parameter name.
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// The configured fallback locale.
    pub fn fallback_locale(&self) -> &LocaleCode {
        &self.fallback_locale
    }

    /// Whether `init` has completed on this instance.
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// The locale applied by `init`, if any.
    pub fn applied_locale(&self) -> Option<&LocaleCode> {
        self.active.as_ref().map(|a| &a.locale)
    }

    /// Path of the cache artifact backing the active catalog, if any.
    pub fn artifact_path(&self) -> Option<&std::path::Path> {
        self.active.as_ref().map(|a| a.artifact_path.as_path())
    }

    /// Non-fatal cache conditions reported by `init`.
    pub fn cache_warnings(&self) -> &[CacheWarning] {
        self.active.as_ref().map_or(&[], |a| a.warnings.as_slice())
    }

    /// Build a source set from request maps using the configured
    /// parameter name.
    pub fn sources_from_request(
        &self,
        params: &HashMap<String, String>,
        session: &HashMap<String, String>,
        cookies: &HashMap<String, String>,
        header: Option<&str>,
    ) -> SourceSet {
        SourceSet::from_request(&self.param_name, params, session, cookies, header)
    }

    /// The negotiated candidate order for `sources`, without initializing.
    pub fn detect_languages(&self, sources: &SourceSet) -> Vec<LocaleCode> {
        self.negotiator().detect(sources)
    }

    /// Negotiate a locale, compile or reuse its cache artifact, and load
    /// the active catalog.
    ///
    /// Walks the negotiated candidates and applies the first with a
    /// backing catalog document; exhausting the list is
    /// [`InitError::NoCatalog`]. One-shot: a second call returns
    /// [`InitError::AlreadyInitialized`].
    pub fn init(&mut self, sources: &SourceSet) -> Result<(), InitError> {
        if self.active.is_some() {
            return Err(InitError::AlreadyInitialized);
        }

        let loader = self.loader();
        let candidates = self.negotiator().detect(sources);
        let applied = candidates
            .iter()
            .find(|candidate| loader.exists(candidate))
            .cloned()
            .ok_or(InitError::NoCatalog { candidates })?;

        let cache = CatalogCache::new(self.cache_dir.clone(), self.cache_prefix.clone(), loader);
        let outcome = cache.get_or_compile(&applied)?;

        self.active = Some(Active {
            locale: applied,
            catalog: outcome.catalog,
            artifact_path: outcome.artifact_path,
            warnings: outcome.warnings,
        });
        Ok(())
    }

    /// Resolve a message key into a localized, substituted string.
    ///
    /// If the key is absent from the active catalog (or its template is
    /// empty, or the resolver is uninitialized), the key itself is
    /// returned — lookup never fails the caller. With an empty context the
    /// raw template is returned unchanged. Otherwise each context value is
    /// itself resolved through this same lookup before being substituted
    /// positionally, left to right; recursion is bounded by a depth and
    /// cycle guard, degrading to raw text when tripped.
    pub fn l(&self, key: &str, context: &[Arg]) -> String {
        let mut guard = ResolveContext::new();
        self.resolve(key, context, &mut guard)
    }

    fn resolve(&self, key: &str, context: &[Arg], guard: &mut ResolveContext) -> String {
        let Some(active) = self.active.as_ref() else {
            return key.to_string();
        };
        let Some(template) = active.catalog.get(key).filter(|t| !t.is_empty()) else {
            return key.to_string();
        };
        if context.is_empty() {
            return template.to_string();
        }
        if !guard.enter(key) {
            // Cycle or depth limit: stop substituting, keep the text.
            return template.to_string();
        }

        let values: Vec<String> = context
            .iter()
            .map(|arg| self.resolve_arg(arg, guard))
            .collect();
        let rendered = parse_template(template).substitute(&values);

        guard.leave();
        rendered
    }

    fn resolve_arg(&self, arg: &Arg, guard: &mut ResolveContext) -> String {
        match arg {
            Arg::Text(text) => self.resolve(text, &[], guard),
            Arg::Message { key, context } => self.resolve(key, context, guard),
        }
    }

    fn negotiator(&self) -> Negotiator {
        Negotiator::new(self.fallback_locale.clone())
    }

    fn loader(&self) -> CatalogLoader {
        CatalogLoader::new(
            self.path_template.clone(),
            self.fallback_locale.clone(),
            self.merge_fallback,
        )
    }
}
