//! Function words that never receive an emoji.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use crate::error::LoadError;
use crate::normalize::normalize;
use crate::store::read_json;

/// Curated French function words.
const FRENCH_STOP_WORDS: &[&str] = &[
    // Determiners
    "un", "une", "le", "la", "les", "des", "du", "de", "au", "aux",
    // Pronouns
    "ce", "se", "je", "tu", "il", "elle", "on", "nous", "vous", "ils", "elles", "me", "te",
    "lui", "leur", "en", "y", "qui", "que", "quoi", "dont", "où", "celui", "celle", "ceux",
    "celles", "ceci", "cela", "ça",
    // Conjunctions and prepositions
    "et", "ou", "mais", "donc", "car", "ni", "or", "avec", "pour", "sur", "sous", "dans",
    "par", "sans", "chez", "vers", "entre",
    // Common adverbs
    "plus", "moins", "très", "trop", "peu", "bien", "mal", "tout", "rien", "aussi", "encore",
    "déjà", "jamais", "toujours", "souvent", "parfois",
    // Auxiliaries and high-frequency verbs
    "être", "avoir", "faire", "aller", "voir", "dire", "pouvoir", "vouloir", "devoir",
    // Possessives
    "son", "sa", "ses", "mon", "ma", "mes", "ton", "ta", "tes", "notre", "votre",
    // Other grammatical words
    "même", "autre", "tel", "quel", "chaque", "quelque", "aucun", "comme", "quand",
    "comment", "pourquoi", "combien",
];

/// A fixed set of normalized words that are force-resolved to "no emoji".
///
/// # Example
///
/// ```
/// use lexmoji::StopWords;
///
/// let stopwords = StopWords::french();
/// assert!(stopwords.contains("le"));
/// assert!(!stopwords.contains("chat"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// The built-in French set.
    pub fn french() -> Self {
        FRENCH_STOP_WORDS.iter().collect()
    }

    pub fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    /// Adds more words, normalizing each one.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|word| normalize(word.as_ref())));
    }

    /// Adds the words of a JSON array document.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, LoadError> {
        let words: Vec<String> = read_json(path)?;
        self.extend(&words);
        info!(path = %path.display(), words = words.len(), "loaded stop words");
        Ok(words.len())
    }

    /// Membership test for an already-normalized key.
    pub fn contains(&self, key: &str) -> bool {
        self.words.contains(key)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::french()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stopwords = Self::empty();
        stopwords.extend(iter);
        stopwords
    }
}
