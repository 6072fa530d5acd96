//! Implementation of the `lingo compile` command.

use std::path::PathBuf;

use clap::Args;
use miette::{miette, Result};
use serde::Serialize;

use lingo::{CatalogCache, CatalogLoader, LocaleCode};

/// Arguments for the compile command.
#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Locale to compile
    #[arg(long, required = true)]
    pub lang: String,

    /// Fallback locale
    #[arg(long, default_value = "en")]
    pub fallback: String,

    /// Path template containing the {locale} token
    #[arg(long, default_value = "locale/{locale}/user_interface.json")]
    pub path_template: String,

    /// Cache artifact directory
    #[arg(long, default_value = "locale/cache")]
    pub cache_dir: PathBuf,

    /// Namespace prefix for artifact file names
    #[arg(long, default_value = "lingo")]
    pub prefix: String,

    /// Merge the fallback catalog underneath the compiled one
    #[arg(long)]
    pub merge_fallback: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for compile results.
#[derive(Serialize)]
struct CompileResult {
    locale: String,
    artifact: String,
    recompiled: bool,
    entries: usize,
    warnings: Vec<String>,
}

/// Run the compile command.
pub fn run_compile(args: CompileArgs) -> Result<i32> {
    let locale =
        LocaleCode::parse(&args.lang).map_err(|e| miette!("Invalid locale: {}", e))?;
    let fallback = LocaleCode::parse(&args.fallback)
        .map_err(|e| miette!("Invalid fallback locale: {}", e))?;

    let loader = CatalogLoader::new(args.path_template.clone(), fallback, args.merge_fallback);
    let cache = CatalogCache::new(args.cache_dir.clone(), args.prefix.clone(), loader);

    let outcome = cache
        .get_or_compile(&locale)
        .map_err(|e| miette!("Compilation failed: {}", e))?;

    let warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();

    if args.json {
        let output = CompileResult {
            locale: locale.as_str().to_string(),
            artifact: outcome.artifact_path.display().to_string(),
            recompiled: outcome.recompiled,
            entries: outcome.catalog.len(),
            warnings,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| miette!("Failed to serialize result: {}", e))?
        );
    } else {
        let status = if outcome.recompiled {
            "compiled"
        } else {
            "fresh"
        };
        println!(
            "{} ({} entries, {}): {}",
            locale,
            outcome.catalog.len(),
            status,
            outcome.artifact_path.display()
        );
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
    }

    Ok(exitcode::OK)
}
