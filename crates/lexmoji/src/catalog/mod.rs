//! The emoji catalog and the per-locale inverted name index built from it.

mod name_index;

use std::path::Path;

use tracing::info;

use crate::error::LoadError;
use crate::store::read_records;
use crate::types::EmojiRecord;

pub use name_index::{MIN_TOKEN_CHARS, NameIndex, NameIndexSet, tokenize_name};

/// An ordered, read-only collection of emoji records.
///
/// Iteration order is the insertion (file) order and never changes, which is
/// what makes name index builds reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmojiCatalog {
    records: Vec<EmojiRecord>,
}

impl EmojiCatalog {
    pub fn new(records: Vec<EmojiRecord>) -> Self {
        Self { records }
    }

    /// Loads a catalog from a JSON array of `{ "code", "names" }` objects.
    ///
    /// Elements without a valid single-glyph `code` are skipped.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let records = read_records::<EmojiRecord>(path)?;
        info!(
            path = %path.display(),
            records = records.items.len(),
            skipped = records.skipped,
            "loaded emoji catalog"
        );
        Ok(Self::new(records.items))
    }

    pub fn records(&self) -> &[EmojiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<EmojiRecord> for EmojiCatalog {
    fn from_iter<I: IntoIterator<Item = EmojiRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
