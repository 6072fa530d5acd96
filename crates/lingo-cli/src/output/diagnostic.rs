//! Miette diagnostic wrapper for catalog document errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::Path;
use thiserror::Error;

/// A miette-compatible diagnostic for catalog document errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid catalog: {message}")]
#[diagnostic(code(lingo::catalog))]
pub struct CatalogDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl CatalogDiagnostic {
    /// Create a diagnostic from a JSON parse error with source context.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        Self::at_position(path, content, err.line(), err.column(), err.to_string())
    }

    /// Create a diagnostic for a structural problem without a position.
    pub fn structural(path: &Path, content: &str, message: impl Into<String>) -> Self {
        Self::at_position(path, content, 1, 1, message.into())
    }

    fn at_position(
        path: &Path,
        content: &str,
        line: usize,
        column: usize,
        message: String,
    ) -> Self {
        // Convert line:column to byte offset.
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        CatalogDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help: None,
        }
    }
}
