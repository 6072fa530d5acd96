//! Error types for resolver initialization.

use thiserror::Error;

use crate::cache::CacheError;
use crate::types::LocaleCode;

/// Errors that occur during resolver initialization.
#[derive(Debug, Error)]
pub enum InitError {
    /// The resolver instance was already initialized. Initialization is
    /// one-shot; this is a programming error, not a retryable condition.
    #[error("resolver is already initialized")]
    AlreadyInitialized,

    /// No negotiated candidate has a backing catalog. Terminal for the
    /// calling context: the caller must degrade or abort the request.
    #[error("no usable catalog among negotiated candidates: {}", candidates.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", "))]
    NoCatalog {
        /// The candidates that were tried, in negotiated order.
        candidates: Vec<LocaleCode>,
    },

    /// Compiling or reading the cache artifact failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
