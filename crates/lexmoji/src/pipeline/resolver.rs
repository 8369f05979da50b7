use bon::Builder;
use tracing::{debug, info, warn};

use crate::catalog::{NameIndex, NameIndexSet};
use crate::normalize::normalize;
use crate::overrides::ManualOverrides;
use crate::pipeline::{ResolveStats, Stage};
use crate::stopwords::StopWords;
use crate::store::Checkpoint;
use crate::translation::{TranslationCache, Translator};
use crate::types::{CategoryFilter, Resolution, ResolutionIndex, WordEntry};

pub const DEFAULT_PRIMARY_LOCALE: &str = "fr";
pub const DEFAULT_SECONDARY_LOCALE: &str = "en";
/// Entries processed between two translation cache commits.
pub const DEFAULT_FLUSH_EVERY: usize = 500;

/// The outcome for one word and the stage that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub resolution: Resolution,
    pub stage: Stage,
    /// The secondary-locale word, when the translation fallback ran.
    pub translation: Option<String>,
}

impl Decision {
    fn new(resolution: Resolution, stage: Stage) -> Self {
        Self {
            resolution,
            stage,
            translation: None,
        }
    }
}

/// The resolution index produced by a run and its statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolveRun {
    pub index: ResolutionIndex,
    pub stats: ResolveStats,
}

/// Assigns at most one emoji to each lexicon entry.
///
/// The resolver borrows its read-mostly dependencies; the translation cache
/// and the resolution index are passed to [`Resolver::run`], which is their
/// sole writer for the duration of the run.
///
/// # Example
///
/// ```
/// use lexmoji::{ManualOverrides, NameIndexSet, Resolver, StopWords, WordEntry};
/// use lexmoji::{NoCheckpoint, ResolutionIndex, TranslationCache};
///
/// let overrides = ManualOverrides::from_pairs([("chat", "🐱")]).unwrap();
/// let indices = NameIndexSet::new();
/// let stopwords = StopWords::french();
///
/// let resolver = Resolver::builder()
///     .overrides(&overrides)
///     .indices(&indices)
///     .stopwords(&stopwords)
///     .build();
///
/// let entries = vec![WordEntry::new("Chat", "NOM"), WordEntry::new("le", "ART:def")];
/// let run = resolver.run(
///     &entries,
///     ResolutionIndex::new(),
///     &mut TranslationCache::new(),
///     &mut NoCheckpoint,
/// );
/// assert_eq!(run.index.emoji_for("chat").unwrap().as_str(), "🐱");
/// assert_eq!(run.stats.resolved, 1);
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Resolver<'a> {
    overrides: &'a ManualOverrides,
    indices: &'a NameIndexSet,
    stopwords: &'a StopWords,

    /// Translation backend. Without one the fallback stage is skipped.
    translator: Option<&'a dyn Translator>,

    /// Only entries of this category are considered.
    category_filter: Option<CategoryFilter>,

    /// Locale of the lexicon, used for the first name index lookup.
    #[builder(default = DEFAULT_PRIMARY_LOCALE.to_string())]
    primary_locale: String,

    /// Locale translated into for the fallback lookup.
    #[builder(default = DEFAULT_SECONDARY_LOCALE.to_string())]
    secondary_locale: String,

    /// Entries processed between two translation cache commits.
    #[builder(default = DEFAULT_FLUSH_EVERY)]
    flush_every: usize,
}

impl Resolver<'_> {
    /// Resolves every entry, starting from the outcomes of a prior run.
    ///
    /// Entries rejected by the category filter are left untouched and are not
    /// counted. The translation cache is committed through `cache_checkpoint`
    /// every `flush_every` entries and once more at the end when it changed;
    /// a failed commit is logged and the run continues.
    pub fn run(
        &self,
        entries: &[WordEntry],
        prior: ResolutionIndex,
        cache: &mut TranslationCache,
        cache_checkpoint: &mut dyn Checkpoint<TranslationCache>,
    ) -> ResolveRun {
        let mut index = prior;
        let mut stats = ResolveStats::default();
        let flush_every = self.flush_every.max(1);
        let mut committed_len = cache.len();

        if self.index(&self.primary_locale).is_none() {
            warn!(locale = %self.primary_locale, "no name index for primary locale");
        }

        for entry in entries {
            if self
                .category_filter
                .as_ref()
                .is_some_and(|filter| !filter.matches(&entry.category))
            {
                continue;
            }
            let key = normalize(&entry.lemma);
            if key.is_empty() {
                debug!(category = %entry.category, "skipping entry with empty lemma");
                continue;
            }

            let decision = self.decide(&key, index.get(&key), cache);
            debug!(word = %key, stage = %decision.stage, "resolved");
            stats.record(&decision);
            index.assign(key, decision.resolution);

            if stats.total % flush_every == 0 && cache.len() != committed_len {
                committed_len = commit_cache(cache, cache_checkpoint);
            }
        }

        if cache.len() != committed_len {
            commit_cache(cache, cache_checkpoint);
        }

        info!(
            total = stats.total,
            resolved = stats.resolved,
            via_translation = stats.via_translation,
            "resolution run finished"
        );
        ResolveRun { index, stats }
    }

    /// Resolves a single word without a prior value.
    ///
    /// The word is normalized first. Useful for explaining a result: the
    /// returned [`Decision`] names the deciding stage and the translation.
    pub fn resolve_word(&self, word: &str, cache: &mut TranslationCache) -> Decision {
        self.decide(&normalize(word), None, cache)
    }

    fn decide(
        &self,
        key: &str,
        prior: Option<&Resolution>,
        cache: &mut TranslationCache,
    ) -> Decision {
        if let Some(emoji) = self.overrides.get(key) {
            return Decision::new(Resolution::Emoji(emoji.clone()), Stage::Override);
        }
        if self.stopwords.contains(key) {
            return Decision::new(Resolution::Suppressed, Stage::StopWord);
        }
        if let Some(Resolution::Emoji(emoji)) = prior {
            return Decision::new(Resolution::Emoji(emoji.clone()), Stage::Prior);
        }
        if let Some(emoji) = self.index(&self.primary_locale).and_then(|idx| idx.get(key)) {
            return Decision::new(Resolution::Emoji(emoji.clone()), Stage::PrimaryName);
        }

        let Some(translator) = self.translator else {
            return Decision::new(Resolution::Unresolved, Stage::Unresolved);
        };
        let translation = cache
            .translate(key, translator, &self.primary_locale, &self.secondary_locale)
            .into_word();
        let found = translation
            .as_deref()
            .and_then(|word| self.index(&self.secondary_locale)?.get(word));

        let (resolution, stage) = match found {
            Some(emoji) => (Resolution::Emoji(emoji.clone()), Stage::Translation),
            None => (Resolution::Unresolved, Stage::Unresolved),
        };
        Decision {
            resolution,
            stage,
            translation,
        }
    }

    fn index(&self, locale: &str) -> Option<&NameIndex> {
        self.indices.get(locale)
    }
}

/// Commits the cache, returning its committed length.
fn commit_cache(
    cache: &TranslationCache,
    checkpoint: &mut dyn Checkpoint<TranslationCache>,
) -> usize {
    match checkpoint.save(cache) {
        Ok(()) => cache.len(),
        Err(e) => {
            warn!(error = %e, "failed to commit translation cache");
            // Retry at the next opportunity.
            usize::MAX
        }
    }
}
