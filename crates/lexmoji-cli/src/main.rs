//! lexmoji CLI entry point.
//!
//! Builds and inspects a French word to emoji index:
//! - `lexmoji extract` - Build a lexicon from a raw frequency table
//! - `lexmoji resolve` - Resolve lexicon entries from local data
//! - `lexmoji suggest` - Fill remaining gaps with a suggestion model
//! - `lexmoji stats` - Summarize an index
//! - `lexmoji lookup` - Explain how one word resolves
//! - `lexmoji names` - Dump the name index of a locale

mod commands;
mod error;
mod output;
mod services;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_extract, run_lookup, run_names, run_resolve, run_stats, run_suggest, ExtractArgs,
    LookupArgs, NamesArgs, ResolveArgs, StatsArgs, SuggestArgs,
};
use miette::{MietteHandlerOpts, Report};
use tracing_subscriber::EnvFilter;

/// French word to emoji index tools.
#[derive(Debug, Parser)]
#[command(name = "lexmoji")]
#[command(about = "French word to emoji index tools", long_about = None)]
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
    /// Build a lexicon from a raw frequency-annotated table
    Extract(ExtractArgs),
    /// Resolve lexicon entries to emojis from local data and translation
    Resolve(ResolveArgs),
    /// Fill unresolved words with an external suggestion model
    Suggest(SuggestArgs),
    /// Summarize a resolution index
    Stats(StatsArgs),
    /// Explain how a single word resolves
    Lookup(LookupArgs),
    /// Write the emoji name index of a locale
    Names(NamesArgs),
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

/// Log to stderr, filtered by `RUST_LOG` when set.
fn setup_logging(verbose: bool, color_when: ColorWhen) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!matches!(color_when, ColorWhen::Never))
        .with_writer(stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose, cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Extract(args) => run_extract(args),
        Commands::Resolve(args) => run_resolve(args),
        Commands::Suggest(args) => run_suggest(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Lookup(args) => run_lookup(args),
        Commands::Names(args) => run_names(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            let code = e.exit_code();
            eprintln!("{:?}", Report::new(e));
            exit(code);
        }
    }
}
