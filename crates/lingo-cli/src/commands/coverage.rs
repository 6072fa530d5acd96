//! Coverage command implementation.

use std::collections::HashSet;

use clap::Args;
use miette::{miette, Result};
use serde::Serialize;

use lingo::{CatalogLoader, LoadError, LocaleCode};

use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source locale whose catalog defines the full key set (e.g., en).
    #[arg(long)]
    pub source: String,

    /// Locales to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Path template containing the {locale} token.
    #[arg(long, default_value = "locale/{locale}/user_interface.json")]
    pub path_template: String,

    /// Exit with non-zero code if any locale is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source_code = LocaleCode::parse(&args.source)
        .map_err(|e| miette!("Invalid source locale: {}", e))?;
    let loader = CatalogLoader::new(args.path_template.clone(), source_code.clone(), false);

    let source_catalog = loader
        .load(&source_code)
        .map_err(|e| miette!("Failed to load source catalog: {}", e))?;
    let source_keys: HashSet<String> = source_catalog.keys().map(str::to_string).collect();
    let source_count = source_keys.len();

    let mut coverage_data: Vec<LocaleCoverage> = Vec::new();

    for lang in &args.lang {
        let code = LocaleCode::parse(lang).map_err(|e| miette!("Invalid locale: {}", e))?;

        let translated_keys: HashSet<String> = match loader.load(&code) {
            Ok(catalog) => catalog.keys().map(str::to_string).collect(),
            // A locale without a catalog is simply fully untranslated.
            Err(LoadError::NotFound { .. }) => HashSet::new(),
            Err(e) => {
                return Err(miette!("Failed to load catalog for '{}': {}", lang, e));
            }
        };

        let mut missing: Vec<String> = source_keys
            .difference(&translated_keys)
            .cloned()
            .collect();
        missing.sort();

        coverage_data.push(LocaleCoverage {
            locale: lang.clone(),
            translated: source_keys.intersection(&translated_keys).count(),
            missing,
        });
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data)
            .map_err(|e| miette!("Failed to serialize results: {}", e))?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        for entry in &coverage_data {
            if !entry.missing.is_empty() {
                println!("\nMissing in {}:", entry.locale);
                for key in &entry.missing {
                    println!("  - {}", key);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
