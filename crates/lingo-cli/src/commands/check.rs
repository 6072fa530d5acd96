//! Implementation of the `lingo check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{miette, Result};
use serde::Serialize;
use serde_json::Value;

use crate::output::CatalogDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Catalog documents to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for check results.
#[derive(Debug, Serialize)]
struct CheckJson {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut results: Vec<CheckJson> = Vec::new();
    let mut first_diagnostic: Option<CatalogDiagnostic> = None;

    for file in &args.files {
        let content = read_to_string(file)
            .map_err(|e| miette!("Failed to read catalog file {:?}: {}", file, e))?;

        let error = match serde_json::from_str::<Value>(&content) {
            Ok(document) => match structural_error(&document) {
                Some(message) => {
                    if first_diagnostic.is_none() {
                        first_diagnostic =
                            Some(CatalogDiagnostic::structural(file, &content, &message));
                    }
                    Some(message)
                }
                None => None,
            },
            Err(e) => {
                if first_diagnostic.is_none() {
                    first_diagnostic =
                        Some(CatalogDiagnostic::from_json_error(file, &content, &e));
                }
                Some(e.to_string())
            }
        };

        results.push(CheckJson {
            file: file.display().to_string(),
            ok: error.is_none(),
            error,
        });
    }

    let any_invalid = results.iter().any(|r| !r.ok);

    if args.json {
        let json_output = serde_json::to_string_pretty(&results)
            .map_err(|e| miette!("Failed to serialize results: {}", e))?;
        println!("{}", json_output);
    } else {
        for result in &results {
            match &result.error {
                Some(error) => println!("{}: INVALID ({})", result.file, error),
                None => println!("{}: OK", result.file),
            }
        }
        if let Some(diagnostic) = first_diagnostic {
            return Err(diagnostic.into());
        }
    }

    if any_invalid {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Find the first structural problem in a parsed catalog document.
///
/// A usable document has an object root and no array leaves anywhere.
fn structural_error(document: &Value) -> Option<String> {
    if !document.is_object() {
        return Some("document root must be an object".to_string());
    }
    find_array_leaf(document, "")
}

fn find_array_leaf(value: &Value, prefix: &str) -> Option<String> {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let joined = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}_{key}")
                };
                if let Some(error) = find_array_leaf(nested, &joined) {
                    return Some(error);
                }
            }
            None
        }
        Value::Array(_) => Some(format!("array value at key '{prefix}'")),
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => None,
    }
}
