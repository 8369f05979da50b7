//! Implementation of the `lexmoji lookup` command.

use std::path::PathBuf;

use clap::Args;
use lexmoji::pipeline::{DEFAULT_PRIMARY_LOCALE, DEFAULT_SECONDARY_LOCALE};
use lexmoji::{normalize, Checkpoint, NameIndexSet, Resolver, Stage, Translator};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::commands::inputs::{load_catalog, TableArgs, TranslateArgs};
use crate::error::CliError;

/// Arguments for the lookup command.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Word to resolve.
    pub word: String,

    /// Emoji catalog.
    #[arg(long)]
    pub catalog: PathBuf,

    #[command(flatten)]
    pub tables: TableArgs,

    #[command(flatten)]
    pub translate: TranslateArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output for the lookup command.
#[derive(Serialize)]
struct LookupResult {
    word: String,
    emoji: Option<String>,
    stage: Stage,
    translation: Option<String>,
    near_misses: Vec<String>,
}

/// Run the lookup command.
pub fn run_lookup(args: LookupArgs) -> Result<i32, CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let overrides = args.tables.load_overrides()?;
    let stopwords = args.tables.load_stopwords()?;
    let indices =
        NameIndexSet::build(&catalog, &[DEFAULT_PRIMARY_LOCALE, DEFAULT_SECONDARY_LOCALE]);

    let mut translation = args.translate.setup()?;
    let translator = translation.translator.as_ref().map(|t| t as &dyn Translator);
    let resolver = Resolver::builder()
        .overrides(&overrides)
        .indices(&indices)
        .stopwords(&stopwords)
        .maybe_translator(translator)
        .build();

    let cached_before = translation.cache.len();
    let decision = resolver.resolve_word(&args.word, &mut translation.cache);
    if translation.cache.len() != cached_before {
        translation.checkpoint.save(&translation.cache)?;
    }

    let key = normalize(&args.word);
    let near_misses = indices
        .get(DEFAULT_PRIMARY_LOCALE)
        .filter(|index| index.get(&key).is_none())
        .map(|index| index.near_misses(&key))
        .unwrap_or_default();

    let result = LookupResult {
        word: key,
        emoji: decision.resolution.emoji().map(ToString::to_string),
        stage: decision.stage,
        translation: decision.translation,
        near_misses,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
        return Ok(exitcode::OK);
    }

    match &result.emoji {
        Some(emoji) => println!(
            "{} {}",
            result.word.if_supports_color(Stream::Stdout, |text| text.bold()),
            emoji
        ),
        None => println!(
            "{} {}",
            result.word.if_supports_color(Stream::Stdout, |text| text.bold()),
            "(no emoji)".if_supports_color(Stream::Stdout, |text| text.dimmed())
        ),
    }
    println!("  decided by: {}", result.stage);
    if let Some(translated) = &result.translation {
        println!("  translation: {translated}");
    }
    if !result.near_misses.is_empty() {
        println!("  did you mean: {}", result.near_misses.join(", "));
    }

    Ok(exitcode::OK)
}
