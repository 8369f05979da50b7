use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::normalize::normalize;
use crate::types::Emoji;

/// The outcome recorded for one word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The word is represented by this emoji.
    Emoji(Emoji),
    /// Explicit "no emoji" that no later stage may replace (stop words).
    Suppressed,
    /// No stage found an emoji yet. Later stages may still try.
    Unresolved,
}

impl Resolution {
    pub fn emoji(&self) -> Option<&Emoji> {
        match self {
            Resolution::Emoji(emoji) => Some(emoji),
            Resolution::Suppressed | Resolution::Unresolved => None,
        }
    }

    /// Whether the value is final: an emoji or an explicit suppression.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

/// Mapping from normalized word to its [`Resolution`].
///
/// This is the primary output artifact. Keys are always normalized. It
/// serializes as a flat, key-sorted `word -> glyph` document in which
/// suppressed and unresolved words are omitted.
///
/// Loading is lenient per entry: a `null`, or a value that is not a single
/// emoji glyph, reads back as [`Resolution::Unresolved`] (the latter with a
/// warning). When two keys normalize to the same word, an emoji beats an
/// unresolved value and the first emoji in key order is kept.
///
/// # Example
///
/// ```
/// use lexmoji::{Emoji, ResolutionIndex};
///
/// let mut index = ResolutionIndex::new();
/// assert!(index.enrich("Chat", Emoji::new("🐱").unwrap()));
/// assert!(!index.enrich("chat", Emoji::new("🐈").unwrap()));
/// assert_eq!(index.emoji_for("CHAT").unwrap().as_str(), "🐱");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct ResolutionIndex {
    entries: BTreeMap<String, Resolution>,
}

impl ResolutionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words with any recorded outcome.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of words that have an emoji.
    pub fn emoji_count(&self) -> usize {
        self.emojis().count()
    }

    /// Outcome for an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&Resolution> {
        self.entries.get(key)
    }

    /// Emoji for `word`, normalizing it first.
    pub fn emoji_for(&self, word: &str) -> Option<&Emoji> {
        self.entries.get(&normalize(word)).and_then(Resolution::emoji)
    }

    /// Whether `key` already carries an emoji or an explicit suppression.
    pub fn is_settled(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(Resolution::is_settled)
    }

    /// Writes an emoji only if the word has no settled value yet.
    ///
    /// Returns true when the index changed. This is the only write path open
    /// to enrichment stages, which keeps enrichment monotonic.
    pub fn enrich(&mut self, word: &str, emoji: Emoji) -> bool {
        let key = normalize(word);
        if self.is_settled(&key) {
            return false;
        }
        self.entries.insert(key, Resolution::Emoji(emoji));
        true
    }

    /// Unconditional write used by the resolution pipeline, the index owner.
    pub(crate) fn assign(&mut self, key: String, resolution: Resolution) {
        self.entries.insert(key, resolution);
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolution)> {
        self.entries.iter().map(|(word, res)| (word.as_str(), res))
    }

    /// Entries that have an emoji, in key order.
    pub fn emojis(&self) -> impl Iterator<Item = (&str, &Emoji)> {
        self.entries
            .iter()
            .filter_map(|(word, res)| res.emoji().map(|emoji| (word.as_str(), emoji)))
    }
}

impl From<BTreeMap<String, Value>> for ResolutionIndex {
    fn from(document: BTreeMap<String, Value>) -> Self {
        let mut index = Self::new();
        for (word, value) in document {
            let resolution = match value {
                Value::Null => Resolution::Unresolved,
                Value::String(glyph) => match Emoji::new(&glyph) {
                    Ok(emoji) => Resolution::Emoji(emoji),
                    Err(e) => {
                        warn!(word = %word, error = %e, "ignoring invalid emoji in index");
                        Resolution::Unresolved
                    }
                },
                other => {
                    warn!(word = %word, value = %other, "ignoring non-string value in index");
                    Resolution::Unresolved
                }
            };
            let key = normalize(&word);
            if !index.is_settled(&key) {
                index.entries.insert(key, resolution);
            }
        }
        index
    }
}

impl FromIterator<(String, Emoji)> for ResolutionIndex {
    fn from_iter<I: IntoIterator<Item = (String, Emoji)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(word, emoji)| (normalize(&word), Resolution::Emoji(emoji)))
            .collect();
        Self { entries }
    }
}

impl Serialize for ResolutionIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.emojis())
    }
}
