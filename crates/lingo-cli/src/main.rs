//! Lingo CLI entry point.
//!
//! Provides command-line tools for working with locale catalogs:
//! - `lingo check` - Validate catalog documents
//! - `lingo coverage` - Report key coverage across locales
//! - `lingo eval` - Resolve a message key
//! - `lingo compile` - Compile or refresh a cache artifact

mod commands;
mod output;

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_compile, run_coverage, run_eval, CheckArgs, CompileArgs, CoverageArgs, EvalArgs,
};

/// Locale catalog tools.
#[derive(Debug, Parser)]
#[command(name = "lingo")]
#[command(about = "Locale catalog tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate catalog documents
    Check(CheckArgs),
    /// Report key coverage across locales
    Coverage(CoverageArgs),
    /// Resolve a message key through a full negotiation pass
    Eval(EvalArgs),
    /// Compile or refresh a locale's cache artifact
    Compile(CompileArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Compile(args) => run_compile(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
