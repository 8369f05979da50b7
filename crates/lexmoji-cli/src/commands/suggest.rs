//! Implementation of the `lexmoji suggest` command.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use lexmoji::lexicon::{candidate_words, load_lexicon};
use lexmoji::store::read_json_or_default;
use lexmoji::suggest::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_WORDS};
use lexmoji::{BatchSuggestionClient, CategoryFilter, JsonCheckpoint, ResolutionIndex};
use tracing::info;

use crate::commands::inputs::TableArgs;
use crate::error::CliError;
use crate::output::table::format_suggest_table;
use crate::services::{OpenAiSuggester, DEFAULT_MODEL, DEFAULT_SUGGEST_URL};

/// Arguments for the suggest command.
#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Lexicon providing the candidate words.
    #[arg(long)]
    pub lexicon: PathBuf,

    /// Resolution index, updated in place after every batch.
    #[arg(long)]
    pub index: PathBuf,

    /// Only request words of this grammatical category (e.g. NOM).
    #[arg(long)]
    pub category: Option<String>,

    /// Words per request.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Cap on words requested in this run.
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    pub max_words: usize,

    /// Pause between batches, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    #[command(flatten)]
    pub tables: TableArgs,

    /// API key for the suggestion service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name.
    #[arg(long, env = "LEXMOJI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Chat completions endpoint.
    #[arg(long, env = "LEXMOJI_SUGGEST_URL", default_value = DEFAULT_SUGGEST_URL)]
    pub suggest_url: String,

    /// Output counters as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run the suggest command.
pub fn run_suggest(args: SuggestArgs) -> Result<i32, CliError> {
    let Some(api_key) = args.api_key.as_deref() else {
        return Err(CliError::config(
            "no API key: pass --api-key or set OPENAI_API_KEY",
        ));
    };

    let entries = load_lexicon(&args.lexicon)?;
    let mut index: ResolutionIndex = read_json_or_default(&args.index)?;
    let overrides = args.tables.load_overrides()?;
    let stopwords = args.tables.load_stopwords()?;

    let filter = args.category.as_deref().map(CategoryFilter::new);
    let candidates = candidate_words(&entries, filter.as_ref());
    info!(
        candidates = candidates.len(),
        indexed = index.emoji_count(),
        "loaded suggestion candidates"
    );

    let source = OpenAiSuggester::new(&args.suggest_url, api_key, &args.model)?;
    let client = BatchSuggestionClient::builder()
        .source(&source)
        .overrides(&overrides)
        .stopwords(&stopwords)
        .batch_size(args.batch_size)
        .max_words(args.max_words)
        .delay(Duration::from_millis(args.delay_ms))
        .build();

    let mut checkpoint = JsonCheckpoint::new(&args.index);
    let report = client.fill_gaps(&mut index, &candidates, &mut checkpoint)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    } else {
        println!("{}", format_suggest_table(&report));
        println!("\nIndex now holds {} emojis", index.emoji_count());
    }

    Ok(exitcode::OK)
}
