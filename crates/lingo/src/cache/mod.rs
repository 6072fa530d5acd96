//! Catalog cache: staleness detection, compilation, atomic publication.
//!
//! The persisted artifact is the only resource shared across request
//! processes. Writers publish with write-then-rename so a reader never
//! observes a half-written artifact; racing writers are tolerated because
//! recompilation is deterministic for a given source state.

mod artifact;

pub use artifact::{CacheArtifact, ENGINE_FINGERPRINT};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogLoader, LoadError};
use crate::types::LocaleCode;

/// Errors that make a cache access fatal for the request.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Loading the source catalog failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// I/O failure preparing or writing the artifact.
    #[error("cache i/o failure at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fully written artifact could not be moved into place.
    #[error("failed to publish cache artifact '{path}': {source}")]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiled payload could not be serialized.
    #[error("failed to serialize cache artifact for '{locale}': {source}")]
    Serialize {
        locale: LocaleCode,
        #[source]
        source: serde_json::Error,
    },
}

/// Non-fatal conditions reported alongside a successful cache access.
#[derive(Debug, Error)]
pub enum CacheWarning {
    /// The artifact was published but its mode could not be restricted.
    /// The artifact itself is intact and usable.
    #[error("could not set permissions on '{path}': {source}")]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a successful [`CatalogCache::get_or_compile`] call.
#[derive(Debug)]
pub struct CacheOutcome {
    /// The loaded (possibly merged) catalog.
    pub catalog: Catalog,
    /// Where the artifact lives on disk.
    pub artifact_path: PathBuf,
    /// Whether this call had to recompile, or reused a fresh artifact.
    pub recompiled: bool,
    /// Non-fatal conditions encountered along the way.
    pub warnings: Vec<CacheWarning>,
}

/// Decides whether a fresh artifact must be (re)compiled, compiles it, and
/// persists it with restrictive permissions.
///
/// Artifact file names are derived deterministically from the engine
/// fingerprint, a configured prefix, and the locale code. Staleness is
/// re-derived from file timestamps on every access, so a concurrently
/// updated source catalog is picked up by the next request.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    cache_dir: PathBuf,
    prefix: String,
    loader: CatalogLoader,
}

impl CatalogCache {
    /// Create a cache over `loader`, persisting artifacts under `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>, prefix: impl Into<String>, loader: CatalogLoader) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            prefix: prefix.into(),
            loader,
        }
    }

    /// The deterministic artifact path for a locale.
    pub fn artifact_path(&self, locale: &LocaleCode) -> PathBuf {
        self.cache_dir.join(format!(
            "{}_{:016x}_{}.json",
            self.prefix, ENGINE_FINGERPRINT, locale
        ))
    }

    /// Return a usable catalog for `locale`, recompiling the artifact if it
    /// is absent, stale, or was produced by a different engine version.
    pub fn get_or_compile(&self, locale: &LocaleCode) -> Result<CacheOutcome, CacheError> {
        let artifact_path = self.artifact_path(locale);
        let source_mtime = self.source_mtime(locale)?;

        if let Some(artifact) = read_fresh(&artifact_path, source_mtime) {
            return Ok(CacheOutcome {
                catalog: artifact.into_catalog(),
                artifact_path,
                recompiled: false,
                warnings: Vec::new(),
            });
        }

        let catalog = self.loader.load(locale)?;
        let artifact = CacheArtifact::compile(locale.clone(), &catalog, source_mtime);
        let warnings = self.publish(&artifact, &artifact_path)?;

        Ok(CacheOutcome {
            catalog,
            artifact_path,
            recompiled: true,
            warnings,
        })
    }

    /// Modification time of the source state: the primary document, joined
    /// with the fallback document's when merging applies.
    fn source_mtime(&self, locale: &LocaleCode) -> Result<i64, CacheError> {
        let primary = self.loader.catalog_path(locale);
        let mut latest = mtime_secs(&primary)?;

        if self.loader.merges_fallback() && locale != self.loader.fallback() {
            let fallback = self.loader.catalog_path(self.loader.fallback());
            latest = latest.max(mtime_secs(&fallback)?);
        }

        Ok(latest)
    }

    /// Serialize and atomically publish an artifact, then restrict its mode.
    ///
    /// The payload is fully written to a temporary file in the cache
    /// directory and renamed into place. A chmod failure after a successful
    /// publish is returned as a warning, not an error.
    fn publish(
        &self,
        artifact: &CacheArtifact,
        artifact_path: &Path,
    ) -> Result<Vec<CacheWarning>, CacheError> {
        fs::create_dir_all(&self.cache_dir).map_err(|source| CacheError::Io {
            path: self.cache_dir.clone(),
            source,
        })?;

        let payload =
            serde_json::to_vec_pretty(artifact).map_err(|source| CacheError::Serialize {
                locale: artifact.locale.clone(),
                source,
            })?;

        let mut staged = NamedTempFile::new_in(&self.cache_dir).map_err(|source| CacheError::Io {
            path: self.cache_dir.clone(),
            source,
        })?;
        staged
            .write_all(&payload)
            .map_err(|source| CacheError::Io {
                path: staged.path().to_path_buf(),
                source,
            })?;
        staged
            .persist(artifact_path)
            .map_err(|e| CacheError::Publish {
                path: artifact_path.to_path_buf(),
                source: e.error,
            })?;

        let mut warnings = Vec::new();
        if let Err(source) = restrict_mode(artifact_path) {
            warnings.push(CacheWarning::Permissions {
                path: artifact_path.to_path_buf(),
                source,
            });
        }
        Ok(warnings)
    }
}

/// Read an existing artifact if it is present, readable, and fresh.
///
/// Unreadable or corrupt artifacts are treated as stale and recompiled.
fn read_fresh(path: &Path, source_mtime: i64) -> Option<CacheArtifact> {
    let bytes = fs::read(path).ok()?;
    let artifact: CacheArtifact = serde_json::from_slice(&bytes).ok()?;
    artifact.is_fresh(source_mtime).then_some(artifact)
}

/// Set the restrictive-but-readable artifact mode.
#[cfg(unix)]
fn restrict_mode(path: &Path) -> Result<(), std::io::Error> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn restrict_mode(_path: &Path) -> Result<(), std::io::Error> {
    Ok(())
}

/// Modification time of a file in unix seconds.
fn mtime_secs(path: &Path) -> Result<i64, CacheError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(source) => {
            return Err(CacheError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let modified = metadata.modified().map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let secs = match modified.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(_) => 0,
    };
    Ok(i64::try_from(secs).unwrap_or(i64::MAX))
}
