//! Implementation of the `lexmoji resolve` command.

use std::path::PathBuf;

use clap::Args;
use lexmoji::lexicon::{annotate, load_lexicon};
use lexmoji::pipeline::{DEFAULT_PRIMARY_LOCALE, DEFAULT_SECONDARY_LOCALE};
use lexmoji::store::{read_json_or_default, write_json_atomic};
use lexmoji::{CategoryFilter, NameIndexSet, ResolutionIndex, ResolveStats, Resolver, Translator};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::commands::inputs::{load_catalog, TableArgs, TranslateArgs};
use crate::error::CliError;
use crate::output::table::format_stage_table;

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Lexicon: JSON array of `{lemme, cgram, score_freq}`.
    #[arg(long)]
    pub lexicon: PathBuf,

    /// Emoji catalog: JSON array of `{code, names: {locale: name}}`.
    #[arg(long)]
    pub catalog: PathBuf,

    /// Resolution index to write. An existing index seeds the run.
    #[arg(long)]
    pub output: PathBuf,

    /// Also write the lexicon with an `emoji` field on every entry.
    #[arg(long)]
    pub annotated: Option<PathBuf>,

    /// Only resolve entries of this grammatical category (e.g. NOM).
    #[arg(long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub tables: TableArgs,

    #[command(flatten)]
    pub translate: TranslateArgs,

    /// Output statistics as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output for the resolve command.
#[derive(Serialize)]
struct ResolveSummary<'a> {
    #[serde(flatten)]
    stats: &'a ResolveStats,
    coverage: f64,
    index_size: usize,
}

/// Run the resolve command.
pub fn run_resolve(args: ResolveArgs) -> Result<i32, CliError> {
    let entries = load_lexicon(&args.lexicon)?;
    let catalog = load_catalog(&args.catalog)?;
    let overrides = args.tables.load_overrides()?;
    let stopwords = args.tables.load_stopwords()?;
    let prior: ResolutionIndex = read_json_or_default(&args.output)?;

    let indices =
        NameIndexSet::build(&catalog, &[DEFAULT_PRIMARY_LOCALE, DEFAULT_SECONDARY_LOCALE]);
    let mut translation = args.translate.setup()?;
    let translator = translation.translator.as_ref().map(|t| t as &dyn Translator);

    let resolver = Resolver::builder()
        .overrides(&overrides)
        .indices(&indices)
        .stopwords(&stopwords)
        .maybe_translator(translator)
        .maybe_category_filter(args.category.as_deref().map(CategoryFilter::new))
        .build();

    let run = resolver.run(
        &entries,
        prior,
        &mut translation.cache,
        translation.checkpoint.as_mut(),
    );

    write_json_atomic(&args.output, &run.index)?;
    if let Some(path) = &args.annotated {
        write_json_atomic(path, &annotate(&entries, &run.index))?;
    }

    if args.json {
        let summary = ResolveSummary {
            stats: &run.stats,
            coverage: run.stats.coverage(),
            index_size: run.index.emoji_count(),
        };
        println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
    } else {
        println!("{}", format_stage_table(&run.stats));
        let coverage = format!(
            "{}/{} ({:.1}%)",
            run.stats.resolved,
            run.stats.total,
            run.stats.coverage()
        );
        println!(
            "\nResolved {}",
            coverage.if_supports_color(Stream::Stdout, |text| text.bold())
        );
        println!("Wrote {}", args.output.display());
        if let Some(path) = &args.annotated {
            println!("Wrote {}", path.display());
        }
    }

    Ok(exitcode::OK)
}
