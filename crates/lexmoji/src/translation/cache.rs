use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::normalize::normalize;
use crate::translation::Translator;

/// Persistent `source word -> translated word | null` store.
///
/// A `null` entry records a failed or empty translation. Both successes and
/// failures are final for the lifetime of the cache: a cached word is never
/// sent to the translator again. Serializes as a flat, key-sorted JSON object.
///
/// # Example
///
/// ```
/// use lexmoji::{TranslateError, TranslationCache, Translator};
///
/// struct Dictionary;
///
/// impl Translator for Dictionary {
///     fn translate(&self, word: &str, _: &str, _: &str) -> Result<String, TranslateError> {
///         match word {
///             "ordinateur" => Ok("Computer".to_string()),
///             _ => Err(TranslateError::Empty { word: word.to_string() }),
///         }
///     }
/// }
///
/// let mut cache = TranslationCache::new();
/// let outcome = cache.translate("ordinateur", &Dictionary, "fr", "en");
/// assert_eq!(outcome.word(), Some("computer"));
/// assert_eq!(cache.get("ordinateur"), Some(Some("computer")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCache {
    entries: BTreeMap<String, Option<String>>,
}

/// Result of a cache-mediated translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// Answered from the cache without calling the translator.
    Cached(Option<String>),
    /// The translator was called and the result written to the cache.
    Fetched(Option<String>),
}

impl TranslationOutcome {
    /// The translated word, if the translation succeeded.
    pub fn word(&self) -> Option<&str> {
        match self {
            TranslationOutcome::Cached(word) | TranslationOutcome::Fetched(word) => {
                word.as_deref()
            }
        }
    }

    pub fn into_word(self) -> Option<String> {
        match self {
            TranslationOutcome::Cached(word) | TranslationOutcome::Fetched(word) => word,
        }
    }
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`: `None` if never attempted, `Some(None)` if the
    /// attempt failed.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(Option::as_deref)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translates `key`, consulting the cache first.
    ///
    /// On a miss the translator is called once; the normalized result, or
    /// `null` on failure or empty output, is written back before returning.
    /// Translator failures never propagate.
    pub fn translate(
        &mut self,
        key: &str,
        translator: &dyn Translator,
        source: &str,
        target: &str,
    ) -> TranslationOutcome {
        if let Some(cached) = self.entries.get(key) {
            return TranslationOutcome::Cached(cached.clone());
        }

        let translated = match translator.translate(key, source, target) {
            Ok(text) => Some(normalize(&text)).filter(|word| !word.is_empty()),
            Err(e) => {
                warn!(word = key, error = %e, "translation failed, caching as null");
                None
            }
        };
        debug!(word = key, translated = ?translated, "translated");
        self.entries.insert(key.to_string(), translated.clone());
        TranslationOutcome::Fetched(translated)
    }
}
