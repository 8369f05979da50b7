use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// A single emoji glyph.
///
/// `Emoji` wraps a string that is exactly one extended grapheme cluster, so
/// ZWJ sequences (`👨‍👩‍👧‍👦`), keycaps (`1️⃣`), flags and skin-tone variants are
/// accepted while prose or multi-emoji strings are rejected. A lone letter,
/// digit or ASCII symbol is not a glyph either, keycaps aside. Surrounding
/// whitespace is trimmed on construction.
///
/// # Example
///
/// ```
/// use lexmoji::Emoji;
///
/// let cat = Emoji::new(" 🐱 ").unwrap();
/// assert_eq!(cat.as_str(), "🐱");
///
/// assert!(Emoji::new("🐱🐶").is_err());
/// assert!(Emoji::new("").is_err());
/// assert!(Emoji::new("x").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Emoji(String);

/// Why a string was rejected as an emoji glyph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEmoji {
    #[error("emoji value is empty")]
    Empty,

    #[error("'{value}' has {clusters} grapheme clusters, expected exactly one")]
    NotSingleGlyph { value: String, clusters: usize },

    #[error("'{value}' is a letter or symbol, not an emoji")]
    NotEmoji { value: String },
}

/// Combining enclosing keycap, as in `1️⃣`.
const KEYCAP: char = '\u{20E3}';

impl Emoji {
    /// Validates and wraps a glyph.
    pub fn new(value: &str) -> Result<Self, InvalidEmoji> {
        let value = value.trim();
        if value.is_empty() {
            return Err(InvalidEmoji::Empty);
        }
        let clusters = value.graphemes(true).count();
        if clusters != 1 {
            return Err(InvalidEmoji::NotSingleGlyph {
                value: value.to_string(),
                clusters,
            });
        }
        if !is_pictographic(value) {
            return Err(InvalidEmoji::NotEmoji {
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether a single grapheme cluster reads as a pictograph rather than text.
fn is_pictographic(cluster: &str) -> bool {
    let Some(lead) = cluster.chars().next() else {
        return false;
    };
    cluster.contains(KEYCAP) || !(lead.is_ascii() || lead.is_alphanumeric())
}

impl TryFrom<String> for Emoji {
    type Error = InvalidEmoji;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Emoji> for String {
    fn from(emoji: Emoji) -> Self {
        emoji.0
    }
}

impl AsRef<str> for Emoji {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
