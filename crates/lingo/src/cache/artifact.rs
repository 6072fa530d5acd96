use std::collections::BTreeMap;

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::LocaleCode;

/// Fingerprint of the engine's compilation logic.
///
/// Baked into every artifact (and its file name), so artifacts compiled by
/// a different engine version are invalidated wholesale rather than
/// misread. Bump the format tag when the artifact layout changes.
pub const ENGINE_FINGERPRINT: u64 =
    fnv1a_hash_str_64(concat!("catalog-artifact-v1/", env!("CARGO_PKG_VERSION")));

/// A compiled, directly loadable representation of a merged catalog.
///
/// The artifact is neutral serialized data loaded via ordinary
/// deserialization. `compiled_at` is the source state's modification time,
/// not the wall clock, so recompiling unchanged sources reproduces the
/// artifact byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheArtifact {
    /// The locale this artifact was compiled for.
    pub locale: LocaleCode,
    /// Modification time (unix seconds) of the source state the artifact
    /// was compiled from. The artifact is usable iff this is not earlier
    /// than the current source modification time.
    pub compiled_at: i64,
    /// Engine fingerprint at compile time.
    pub fingerprint: u64,
    /// The compiled, merged, flattened catalog entries.
    pub entries: BTreeMap<String, String>,
}

impl CacheArtifact {
    /// Compile a catalog into an artifact tagged with the source state.
    pub fn compile(locale: LocaleCode, catalog: &Catalog, source_mtime: i64) -> Self {
        Self {
            locale,
            compiled_at: source_mtime,
            fingerprint: ENGINE_FINGERPRINT,
            entries: catalog.entries().clone(),
        }
    }

    /// Whether this artifact is usable without recompilation against the
    /// given source modification time.
    pub fn is_fresh(&self, source_mtime: i64) -> bool {
        self.fingerprint == ENGINE_FINGERPRINT && self.compiled_at >= source_mtime
    }

    /// Convert the artifact payload back into a catalog.
    pub fn into_catalog(self) -> Catalog {
        Catalog::from_entries(self.entries)
    }
}
