//! Catalog loading from JSON documents, with fallback merging.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::catalog::{Catalog, LoadError};
use crate::types::LocaleCode;

/// Token substituted with the locale code in the path template.
pub const LOCALE_TOKEN: &str = "{locale}";

/// Reads a locale's catalog document from storage and, when merging is
/// enabled, deep-merges the fallback locale's document underneath it.
///
/// The backing path is derived from a template containing the `{locale}`
/// token, e.g. `locale/{locale}/user_interface.json`.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path_template: String,
    fallback: LocaleCode,
    merge_fallback: bool,
}

impl CatalogLoader {
    /// Create a loader for the given path template and fallback locale.
    pub fn new(
        path_template: impl Into<String>,
        fallback: LocaleCode,
        merge_fallback: bool,
    ) -> Self {
        Self {
            path_template: path_template.into(),
            fallback,
            merge_fallback,
        }
    }

    /// Resolve the backing path for a locale.
    pub fn catalog_path(&self, locale: &LocaleCode) -> PathBuf {
        PathBuf::from(self.path_template.replace(LOCALE_TOKEN, locale.as_str()))
    }

    /// Whether a catalog document exists for `locale`.
    pub fn exists(&self, locale: &LocaleCode) -> bool {
        self.catalog_path(locale).is_file()
    }

    /// The fallback locale merged underneath primaries.
    pub fn fallback(&self) -> &LocaleCode {
        &self.fallback
    }

    /// Whether fallback merging is enabled.
    pub fn merges_fallback(&self) -> bool {
        self.merge_fallback
    }

    /// Load the catalog for `locale`.
    ///
    /// When fallback merging is enabled and `locale` is not itself the
    /// fallback, the fallback document is merged underneath: entries
    /// present in the primary always win, fallback entries only fill gaps,
    /// recursively through nested structure.
    pub fn load(&self, locale: &LocaleCode) -> Result<Catalog, LoadError> {
        let primary = self.read_document(locale)?;

        let document = if self.merge_fallback && locale != &self.fallback {
            let fallback = self.read_document(&self.fallback)?;
            deep_merge(primary, fallback)
        } else {
            primary
        };

        let path = self.catalog_path(locale);
        if !document.is_object() {
            return Err(LoadError::InvalidDocument {
                path,
                message: "document root must be an object".to_string(),
            });
        }

        let mut entries = BTreeMap::new();
        flatten_into("", &document, &mut entries, &path)?;
        Ok(Catalog::from_entries(entries))
    }

    /// Read and parse one locale's document.
    fn read_document(&self, locale: &LocaleCode) -> Result<Value, LoadError> {
        let path = self.catalog_path(locale);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound { path });
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| LoadError::Parse { path, source })
    }
}

/// Deep-merge `fallback` underneath `primary`.
///
/// Primary entries always win; fallback entries only fill otherwise-absent
/// keys. Recurses where both sides are objects, otherwise the primary value
/// stands.
pub(crate) fn deep_merge(primary: Value, fallback: Value) -> Value {
    match (primary, fallback) {
        (Value::Object(mut primary), Value::Object(fallback)) => {
            for (key, fallback_value) in fallback {
                match primary.remove(&key) {
                    Some(primary_value) => {
                        primary.insert(key, deep_merge(primary_value, fallback_value));
                    }
                    None => {
                        primary.insert(key, fallback_value);
                    }
                }
            }
            Value::Object(primary)
        }
        (primary, _) => primary,
    }
}

/// Flatten a JSON document into `KEY_SUBKEY`-style entries.
///
/// Scalar leaves are coerced to their display strings; null leaves are
/// treated as absent; array leaves are rejected.
fn flatten_into(
    prefix: &str,
    value: &Value,
    out: &mut BTreeMap<String, String>,
    path: &std::path::Path,
) -> Result<(), LoadError> {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let joined = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}_{key}")
                };
                flatten_into(&joined, nested, out, path)?;
            }
            Ok(())
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
            Ok(())
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
            Ok(())
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
            Ok(())
        }
        Value::Null => Ok(()),
        Value::Array(_) => Err(LoadError::InvalidDocument {
            path: path.to_path_buf(),
            message: format!("array value at key '{prefix}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_primary_wins() {
        let merged = deep_merge(
            json!({"A": "primary", "NESTED": {"X": "1"}}),
            json!({"A": "fallback", "B": "filled", "NESTED": {"X": "2", "Y": "3"}}),
        );
        assert_eq!(
            merged,
            json!({"A": "primary", "B": "filled", "NESTED": {"X": "1", "Y": "3"}})
        );
    }

    #[test]
    fn deep_merge_with_self_is_identity() {
        let doc = json!({"A": "a", "NESTED": {"X": "1"}});
        assert_eq!(deep_merge(doc.clone(), doc.clone()), doc);
    }
}
