//! Lexicon documents: loading entries, extracting them from a raw
//! frequency table, and annotating them with their resolved emoji.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::normalize::normalize;
use crate::store::read_records;
use crate::types::{CategoryFilter, Emoji, ResolutionIndex, WordEntry};

/// Frequency band used by [`extract`] when none is given.
pub const DEFAULT_BAND: &str = "cp_cm2";
/// Minimum band frequency kept by [`extract`] when none is given.
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Loads lexicon entries from a JSON array, in file order.
///
/// Records missing `lemme` or `cgram`, or holding blank ones, are skipped.
pub fn load_lexicon(path: &Path) -> Result<Vec<WordEntry>, LoadError> {
    let records = read_records::<WordEntry>(path)?;
    let read = records.items.len();
    let entries: Vec<WordEntry> = records
        .items
        .into_iter()
        .filter(|entry| !entry.lemma.trim().is_empty() && !entry.category.trim().is_empty())
        .collect();
    info!(
        path = %path.display(),
        entries = entries.len(),
        skipped = records.skipped + (read - entries.len()),
        "loaded lexicon"
    );
    Ok(entries)
}

/// One row of a raw frequency-annotated lexicon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLexiconRecord {
    #[serde(alias = "lemma")]
    pub lemme: String,

    #[serde(alias = "category")]
    pub cgram: String,

    /// Frequency per band, e.g. `{"cp": 12.4, "cp_cm2": 8.1}`.
    #[serde(default)]
    pub freq: BTreeMap<String, f64>,
}

/// Loads a raw lexicon, skipping malformed rows.
pub fn load_raw_lexicon(path: &Path) -> Result<Vec<RawLexiconRecord>, LoadError> {
    let records = read_records::<RawLexiconRecord>(path)?;
    info!(
        path = %path.display(),
        records = records.items.len(),
        skipped = records.skipped,
        "loaded raw lexicon"
    );
    Ok(records.items)
}

/// Result of [`extract`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extraction {
    pub entries: Vec<WordEntry>,
    /// Rows examined.
    pub read: usize,
    /// Rows dropped for a band frequency under the threshold.
    pub rare: usize,
    /// Entries kept after deduplication.
    pub kept: usize,
}

/// Builds lexicon entries from raw rows.
///
/// Keeps rows whose frequency in `band` is at least `threshold` (a missing
/// band counts as zero), keeps the first row of each `(lemma, category)`
/// pair, and sorts by frequency, highest first. Rows of equal frequency keep
/// their input order.
pub fn extract(records: &[RawLexiconRecord], band: &str, threshold: f64) -> Extraction {
    let mut seen = BTreeSet::new();
    let mut rare = 0;
    let mut entries = Vec::new();

    for record in records {
        let lemma = record.lemme.trim();
        let category = record.cgram.trim();
        if lemma.is_empty() || category.is_empty() {
            debug!(lemma, category, "skipping incomplete raw record");
            continue;
        }
        let frequency = record.freq.get(band).copied().unwrap_or(0.0);
        if frequency < threshold {
            rare += 1;
            continue;
        }
        if seen.insert((lemma.to_string(), category.to_string())) {
            entries.push(
                WordEntry::builder()
                    .lemma(lemma)
                    .category(category)
                    .frequency(frequency)
                    .build(),
            );
        }
    }

    entries.sort_by(|a, b| {
        b.frequency
            .partial_cmp(&a.frequency)
            .unwrap_or(Ordering::Equal)
    });
    let kept = entries.len();
    info!(read = records.len(), rare, kept, band, threshold, "extracted lexicon");
    Extraction {
        entries,
        read: records.len(),
        rare,
        kept,
    }
}

/// Normalized, unique, sorted words of the entries matching `filter`.
///
/// Single-character words are left out.
pub fn candidate_words(entries: &[WordEntry], filter: Option<&CategoryFilter>) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| filter.is_none_or(|filter| filter.matches(&entry.category)))
        .map(|entry| normalize(&entry.lemma))
        .filter(|word| word.chars().count() > 1)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A lexicon entry together with its resolved emoji.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedEntry<'a> {
    #[serde(flatten)]
    pub entry: &'a WordEntry,
    pub emoji: Option<&'a Emoji>,
}

/// Pairs each entry with the emoji the index holds for it, in entry order.
pub fn annotate<'a>(entries: &'a [WordEntry], index: &'a ResolutionIndex) -> Vec<AnnotatedEntry<'a>> {
    entries
        .iter()
        .map(|entry| AnnotatedEntry {
            entry,
            emoji: index.emoji_for(&entry.lemma),
        })
        .collect()
}
