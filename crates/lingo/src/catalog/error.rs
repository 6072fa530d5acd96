//! Error types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading a catalog document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No catalog document exists at the resolved path.
    #[error("no catalog found at '{path}'")]
    NotFound { path: PathBuf },

    /// File I/O error while reading the document.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed JSON.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document is well-formed but structurally unusable.
    #[error("invalid catalog document '{path}': {message}")]
    InvalidDocument { path: PathBuf, message: String },
}
