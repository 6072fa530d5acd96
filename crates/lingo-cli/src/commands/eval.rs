//! Implementation of the `lingo eval` command.

use std::path::PathBuf;

use clap::Args;
use miette::{miette, Result};
use serde::Serialize;

use lingo::{Arg, LocaleCode, Resolver, SourceSet};

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Message key to resolve
    #[arg(long, required = true)]
    pub key: String,

    /// Context values substituted into the template (repeatable)
    #[arg(short = 'a', long = "arg")]
    pub args: Vec<String>,

    /// Locale to force (skips other negotiation sources)
    #[arg(long)]
    pub lang: Option<String>,

    /// Fallback locale
    #[arg(long, default_value = "en")]
    pub fallback: String,

    /// Path template containing the {locale} token
    #[arg(long, default_value = "locale/{locale}/user_interface.json")]
    pub path_template: String,

    /// Cache artifact directory
    #[arg(long, default_value = "locale/cache")]
    pub cache_dir: PathBuf,

    /// Merge the fallback catalog underneath the resolved one
    #[arg(long)]
    pub merge_fallback: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub locale: String,
    pub key: String,
    pub result: String,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let fallback = LocaleCode::parse(&args.fallback)
        .map_err(|e| miette!("Invalid fallback locale: {}", e))?;

    let mut resolver = Resolver::builder()
        .path_template(args.path_template.clone())
        .cache_dir(args.cache_dir.clone())
        .fallback_locale(fallback)
        .merge_fallback(args.merge_fallback)
        .build();

    let sources = SourceSet::builder().maybe_forced(args.lang.clone()).build();

    if let Err(e) = resolver.init(&sources) {
        if args.json {
            let output = serde_json::json!({ "error": e.to_string() });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|err| miette!("Failed to serialize error: {}", err))?
            );
            return Ok(exitcode::DATAERR);
        }
        return Err(miette!("Initialization failed: {}", e));
    }

    let context: Vec<Arg> = args.args.iter().map(|v| Arg::from(v.as_str())).collect();
    let result = resolver.l(&args.key, &context);

    let locale = resolver
        .applied_locale()
        .map(|c| c.as_str().to_string())
        .unwrap_or_default();

    if args.json {
        let output = EvalResult {
            locale,
            key: args.key.clone(),
            result,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| miette!("Failed to serialize result: {}", e))?
        );
    } else {
        println!("{}", result);
    }

    Ok(exitcode::OK)
}
