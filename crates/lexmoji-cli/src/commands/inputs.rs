//! Arguments and loaders shared by several commands.

use std::path::{Path, PathBuf};

use clap::Args;
use lexmoji::store::read_json_or_default;
use lexmoji::{
    Checkpoint, EmojiCatalog, JsonCheckpoint, ManualOverrides, NoCheckpoint, StopWords,
    TranslationCache,
};
use tracing::{info, warn};

use crate::error::CliError;
use crate::services::{GoogleTranslator, DEFAULT_TRANSLATE_URL};

/// Curated tables layered under user-provided files.
#[derive(Debug, Args)]
pub struct TableArgs {
    /// JSON object of word to emoji, merged over the built-in overrides.
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// JSON array of extra stop words, merged into the built-in set.
    #[arg(long)]
    pub stopwords: Option<PathBuf>,
}

impl TableArgs {
    pub fn load_overrides(&self) -> Result<ManualOverrides, CliError> {
        let mut overrides = ManualOverrides::curated();
        if let Some(path) = &self.overrides {
            overrides.merge_file(path)?;
        }
        Ok(overrides)
    }

    pub fn load_stopwords(&self) -> Result<StopWords, CliError> {
        let mut stopwords = StopWords::french();
        if let Some(path) = &self.stopwords {
            stopwords.extend_from_file(path)?;
        }
        Ok(stopwords)
    }
}

/// Translation fallback settings.
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Translation cache file, created when missing.
    #[arg(long, default_value = "translation_cache.json")]
    pub cache: PathBuf,

    /// Skip the translation fallback entirely.
    #[arg(long)]
    pub no_translate: bool,

    /// Translation endpoint.
    #[arg(long, env = "LEXMOJI_TRANSLATE_URL", default_value = DEFAULT_TRANSLATE_URL)]
    pub translate_url: String,
}

/// A translator with its cache and the cache's commit point.
pub struct TranslationSetup {
    pub translator: Option<GoogleTranslator>,
    pub cache: TranslationCache,
    pub checkpoint: Box<dyn Checkpoint<TranslationCache>>,
}

impl TranslateArgs {
    pub fn setup(&self) -> Result<TranslationSetup, CliError> {
        if self.no_translate {
            return Ok(TranslationSetup {
                translator: None,
                cache: TranslationCache::new(),
                checkpoint: Box::new(NoCheckpoint),
            });
        }
        let cache: TranslationCache = read_json_or_default(&self.cache)?;
        info!(path = %self.cache.display(), entries = cache.len(), "loaded translation cache");
        Ok(TranslationSetup {
            translator: Some(GoogleTranslator::new(&self.translate_url)?),
            cache,
            checkpoint: Box::new(JsonCheckpoint::new(&self.cache)),
        })
    }
}

pub fn load_catalog(path: &Path) -> Result<EmojiCatalog, CliError> {
    let catalog = EmojiCatalog::load(path)?;
    if catalog.is_empty() {
        warn!(path = %path.display(), "emoji catalog has no usable records");
    }
    Ok(catalog)
}
