use std::collections::{BTreeMap, BTreeSet};
use std::thread;
use std::time::Duration;

use bon::Builder;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::normalize::normalize;
use crate::overrides::ManualOverrides;
use crate::stopwords::StopWords;
use crate::store::Checkpoint;
use crate::suggest::{SuggestionRequest, SuggestionSource, parse_suggestions};
use crate::types::{Emoji, Resolution, ResolutionIndex};

pub const DEFAULT_BATCH_SIZE: usize = 30;
pub const DEFAULT_MAX_WORDS: usize = 200;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Counters for one gap-filling run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SuggestReport {
    /// Words set to their manual override before any request.
    pub overridden: usize,
    /// Words sent to the suggestion source.
    pub requested: usize,
    /// Batches sent.
    pub batches: usize,
    /// Batches whose request or response failed and yielded nothing.
    pub failed_batches: usize,
    /// Words that gained an emoji.
    pub added: usize,
    /// Words the source answered with `null` or left out.
    pub declined: usize,
    /// Words whose proposed value was not a single emoji glyph.
    pub rejected: usize,
}

/// Fills gaps in a [`ResolutionIndex`] from a [`SuggestionSource`].
///
/// Words are sent in bounded batches, and the index is committed after
/// every batch so an interrupted run loses at most the batch in flight.
/// Manual overrides are written first, replacing whatever the index held for
/// those words; override words and stop words are never requested.
#[derive(Builder)]
#[builder(on(String, into))]
pub struct BatchSuggestionClient<'a> {
    source: &'a dyn SuggestionSource,
    overrides: &'a ManualOverrides,
    stopwords: &'a StopWords,

    /// Words per request.
    #[builder(default = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Cap on words requested per run.
    #[builder(default = DEFAULT_MAX_WORDS)]
    max_words: usize,

    /// Pause between two batches.
    #[builder(default = DEFAULT_DELAY)]
    delay: Duration,

    #[builder(default = "French".to_string())]
    language: String,

    #[builder(default = "young children".to_string())]
    audience: String,
}

impl BatchSuggestionClient<'_> {
    /// Words from `candidates` that still need a suggestion, capped at
    /// `max_words`, in candidate order and without duplicates.
    pub fn pending_words(&self, index: &ResolutionIndex, candidates: &[String]) -> Vec<String> {
        let mut seen = BTreeSet::new();
        candidates
            .iter()
            .map(|word| normalize(word))
            .filter(|key| !key.is_empty())
            .filter(|key| !index.is_settled(key))
            .filter(|key| !self.overrides.contains(key) && !self.stopwords.contains(key))
            .filter(|key| seen.insert(key.clone()))
            .take(self.max_words)
            .collect()
    }

    /// Sets every override word found in the index or among `candidates` to
    /// its override value. Returns the number of words that changed.
    pub fn apply_overrides(&self, index: &mut ResolutionIndex, candidates: &[String]) -> usize {
        let candidates: BTreeSet<String> = candidates.iter().map(|word| normalize(word)).collect();
        let mut changed = 0;
        for (word, emoji) in self.overrides.iter() {
            let present = index.get(word).is_some() || candidates.contains(word);
            if present && index.get(word).and_then(Resolution::emoji) != Some(emoji) {
                index.assign(word.to_string(), Resolution::Emoji(emoji.clone()));
                changed += 1;
            }
        }
        changed
    }

    /// Applies the overrides, then requests suggestions for the pending
    /// candidates and merges them.
    ///
    /// A failed request or an unparsable answer yields zero results for that
    /// batch and the run moves on. Only a failed commit aborts the run, since
    /// resumability cannot be guaranteed past it.
    pub fn fill_gaps(
        &self,
        index: &mut ResolutionIndex,
        candidates: &[String],
        checkpoint: &mut dyn Checkpoint<ResolutionIndex>,
    ) -> Result<SuggestReport, StoreError> {
        let overridden = self.apply_overrides(index, candidates);
        if overridden > 0 {
            info!(overridden, "applied manual overrides");
            checkpoint.save(index)?;
        }

        let to_process = self.pending_words(index, candidates);
        let mut report = SuggestReport {
            overridden,
            requested: to_process.len(),
            ..SuggestReport::default()
        };
        let total_batches = to_process.len().div_ceil(self.batch_size.max(1));
        info!(words = to_process.len(), batches = total_batches, "filling gaps");

        for (number, batch) in to_process.chunks(self.batch_size.max(1)).enumerate() {
            if number > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            report.batches += 1;
            debug!(batch = number + 1, of = total_batches, words = batch.len(), "requesting");

            match self.request(batch) {
                Some(suggestions) => self.merge(index, batch, &suggestions, &mut report),
                None => {
                    report.failed_batches += 1;
                    report.declined += batch.len();
                }
            }
            checkpoint.save(index)?;
        }

        info!(
            added = report.added,
            declined = report.declined,
            rejected = report.rejected,
            failed_batches = report.failed_batches,
            "gap filling finished"
        );
        Ok(report)
    }

    /// Sends one batch. Returns `None` when the batch yields nothing.
    fn request(&self, batch: &[String]) -> Option<BTreeMap<String, Option<String>>> {
        let request = SuggestionRequest::builder()
            .words(batch.to_vec())
            .language(self.language.clone())
            .audience(self.audience.clone())
            .build();

        let raw = match self.source.suggest(&request) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, first = %batch[0], "suggestion request failed");
                return None;
            }
        };
        match parse_suggestions(&raw) {
            Ok(suggestions) => Some(
                suggestions
                    .into_iter()
                    .map(|(word, glyph)| (normalize(&word), glyph))
                    .collect(),
            ),
            Err(e) => {
                let preview: String = raw.chars().take(200).collect();
                warn!(error = %e, preview = %preview, "unparsable suggestion payload");
                None
            }
        }
    }

    fn merge(
        &self,
        index: &mut ResolutionIndex,
        batch: &[String],
        suggestions: &BTreeMap<String, Option<String>>,
        report: &mut SuggestReport,
    ) {
        for word in batch {
            let Some(Some(glyph)) = suggestions.get(word) else {
                report.declined += 1;
                continue;
            };
            if self.overrides.contains(word) || self.stopwords.contains(word) {
                continue;
            }
            match Emoji::new(glyph) {
                Ok(emoji) => {
                    if index.enrich(word, emoji) {
                        report.added += 1;
                    }
                }
                Err(e) => {
                    debug!(word = %word, error = %e, "rejecting suggested value");
                    report.rejected += 1;
                }
            }
        }

        let unrequested = suggestions
            .keys()
            .filter(|word| !batch.contains(word))
            .count();
        if unrequested > 0 {
            debug!(unrequested, "ignoring suggestions for words not in the batch");
        }
    }
}
