//! Inverted index from name words to emoji.
//!
//! Every canonical name in the catalog is split into words, and each word of
//! at least [`MIN_TOKEN_CHARS`] characters points at the *first* record (in
//! catalog order) whose name contains it. `:tête_de_chat:` contributes
//! `tête` and `chat`; `de` is too short to be a useful key.

use std::collections::BTreeMap;

use strsim::levenshtein;
use tracing::debug;

use crate::catalog::EmojiCatalog;
use crate::normalize::normalize;
use crate::types::Emoji;

/// Shortest name word that gets an index entry.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Characters that delimit or separate words inside a canonical name.
const NAME_SEPARATORS: &[char] = &[':', '_'];

/// Splits a canonical name into normalized words.
///
/// Shortcode delimiters (`:`) and underscores separate words like whitespace
/// does, and punctuation is stripped from the edges of each word. Hyphens and
/// apostrophes inside a word are kept, so `arc-en-ciel` stays whole.
///
/// # Example
///
/// ```
/// use lexmoji::catalog::tokenize_name;
///
/// let words: Vec<String> = tokenize_name(":tête_de_chat:").collect();
/// assert_eq!(words, vec!["tête", "de", "chat"]);
/// ```
pub fn tokenize_name(name: &str) -> impl Iterator<Item = String> + '_ {
    name.split(|c: char| c.is_whitespace() || NAME_SEPARATORS.contains(&c))
        .map(|word| word.trim_matches(is_edge_punctuation))
        .filter(|word| !word.is_empty())
        .map(normalize)
}

fn is_edge_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '’' | '‘' | '«' | '»' | '“' | '”')
}

/// Word-to-emoji index for one locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameIndex {
    locale: String,
    words: BTreeMap<String, Emoji>,
}

impl NameIndex {
    /// Builds the index for `locale` from the catalog.
    ///
    /// Records without a name in `locale` are skipped. The build never fails
    /// and is deterministic: the same catalog always yields the same index.
    pub fn build(catalog: &EmojiCatalog, locale: &str) -> Self {
        let mut words = BTreeMap::new();
        let mut unnamed = 0usize;

        for record in catalog.records() {
            let Some(name) = record.canonical_name(locale) else {
                unnamed += 1;
                continue;
            };
            for word in tokenize_name(name) {
                if word.chars().count() < MIN_TOKEN_CHARS {
                    continue;
                }
                words.entry(word).or_insert_with(|| record.code.clone());
            }
        }

        debug!(
            locale,
            records = catalog.len(),
            unnamed,
            words = words.len(),
            "built name index"
        );
        Self {
            locale: locale.to_string(),
            words,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Emoji for an already-normalized word.
    pub fn get(&self, key: &str) -> Option<&Emoji> {
        self.words.get(key)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The index as a key-sorted `word -> emoji` map.
    pub fn words(&self) -> &BTreeMap<String, Emoji> {
        &self.words
    }

    /// Up to three indexed words close to `key`, closest first.
    ///
    /// Words of three characters or fewer allow an edit distance of 1,
    /// longer words allow 2. An exact match is not a near miss.
    pub fn near_misses(&self, key: &str) -> Vec<String> {
        let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
        let mut candidates: Vec<(usize, &String)> = self
            .words
            .keys()
            .filter_map(|candidate| {
                let dist = levenshtein(key, candidate);
                (dist > 0 && dist <= max_distance).then_some((dist, candidate))
            })
            .collect();

        candidates.sort_by_key(|(dist, _)| *dist);
        candidates
            .into_iter()
            .take(3)
            .map(|(_, word)| word.clone())
            .collect()
    }
}

/// Name indexes keyed by locale.
#[derive(Clone, Debug, Default)]
pub struct NameIndexSet {
    indices: BTreeMap<String, NameIndex>,
}

impl NameIndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one index per locale from the same catalog.
    pub fn build(catalog: &EmojiCatalog, locales: &[&str]) -> Self {
        let indices = locales
            .iter()
            .map(|locale| (locale.to_string(), NameIndex::build(catalog, locale)))
            .collect();
        Self { indices }
    }

    /// Adds or replaces the index for its locale.
    pub fn insert(&mut self, index: NameIndex) {
        self.indices.insert(index.locale.clone(), index);
    }

    pub fn get(&self, locale: &str) -> Option<&NameIndex> {
        self.indices.get(locale)
    }
}

impl FromIterator<NameIndex> for NameIndexSet {
    fn from_iter<I: IntoIterator<Item = NameIndex>>(iter: I) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}
