use bon::Builder;
use serde::{Deserialize, Serialize};

/// A lexicon entry: a lemma with its grammatical category and frequency.
///
/// Field names follow the lexicon document (`lemme`, `cgram`,
/// `score_freq`); the English names are accepted as aliases.
///
/// # Example
///
/// ```
/// use lexmoji::WordEntry;
///
/// let entry = WordEntry::builder().lemma("Chat").category("NOM").build();
/// assert_eq!(entry.lemma, "Chat");
/// assert_eq!(entry.frequency, 0.0);
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct WordEntry {
    #[serde(rename = "lemme", alias = "lemma")]
    pub lemma: String,

    /// Lexique-style category tag, e.g. `NOM`, `VER`, `ART:def`.
    #[serde(rename = "cgram", alias = "category")]
    pub category: String,

    #[serde(rename = "score_freq", alias = "frequency", default)]
    #[builder(default)]
    pub frequency: f64,
}

impl WordEntry {
    pub fn new(lemma: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            category: category.into(),
            frequency: 0.0,
        }
    }
}

/// Restricts a run to entries of one grammatical category.
///
/// A filter matches a category tag when the tag equals the filter or when the
/// tag's head (the part before `:`) does, ignoring ASCII case. `ART` therefore
/// matches both `ART` and `ART:def`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryFilter(String);

impl CategoryFilter {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_string())
    }

    /// The common-noun filter used by default in the CLI.
    pub fn nouns() -> Self {
        Self::new("NOM")
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, category: &str) -> bool {
        let category = category.trim();
        let head = category.split(':').next().unwrap_or(category);
        category.eq_ignore_ascii_case(&self.0) || head.eq_ignore_ascii_case(&self.0)
    }
}

impl From<&str> for CategoryFilter {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
