//! Implementation of the `lexmoji stats` command.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use lexmoji::store::read_json;
use lexmoji::ResolutionIndex;
use serde::Serialize;

use crate::error::CliError;
use crate::output::table::{format_shared_table, SharedEmoji};

const TOP_SHARED: usize = 10;
const SAMPLES: usize = 10;

/// Arguments for the stats command.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Resolution index to summarize.
    #[arg(long)]
    pub index: PathBuf,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Summary of a resolution index.
#[derive(Debug, PartialEq, Serialize)]
struct IndexSummary {
    entries: usize,
    unique_emojis: usize,
    /// Emojis used by more than one word, most shared first.
    most_shared: Vec<(String, Vec<String>)>,
    /// First entries in key order.
    samples: Vec<(String, String)>,
}

fn summarize(index: &ResolutionIndex) -> IndexSummary {
    let mut by_emoji: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (word, emoji) in index.emojis() {
        by_emoji
            .entry(emoji.as_str())
            .or_default()
            .push(word.to_string());
    }

    let mut most_shared: Vec<(String, Vec<String>)> = by_emoji
        .iter()
        .filter(|(_, words)| words.len() > 1)
        .map(|(emoji, words)| ((*emoji).to_string(), words.clone()))
        .collect();
    most_shared.sort_by_key(|(_, words)| Reverse(words.len()));
    most_shared.truncate(TOP_SHARED);

    IndexSummary {
        entries: index.emoji_count(),
        unique_emojis: by_emoji.len(),
        most_shared,
        samples: index
            .emojis()
            .take(SAMPLES)
            .map(|(word, emoji)| (word.to_string(), emoji.to_string()))
            .collect(),
    }
}

/// Run the stats command.
pub fn run_stats(args: StatsArgs) -> Result<i32, CliError> {
    let index: ResolutionIndex = read_json(&args.index)?;
    let summary = summarize(&index);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
        return Ok(exitcode::OK);
    }

    println!("Entries:       {}", summary.entries);
    println!("Unique emojis: {}", summary.unique_emojis);
    if !summary.most_shared.is_empty() {
        println!("\nMost shared emojis:");
        let shared: Vec<SharedEmoji> = summary
            .most_shared
            .into_iter()
            .map(|(emoji, words)| SharedEmoji { emoji, words })
            .collect();
        println!("{}", format_shared_table(&shared));
    }
    if !summary.samples.is_empty() {
        println!("\nSamples:");
        for (word, emoji) in &summary.samples {
            println!("  {emoji}  {word}");
        }
    }

    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_counts_and_ranks_shared_emojis() {
        let index: ResolutionIndex = serde_json::from_str(
            r#"{
                "livre": "📖", "lire": "📖", "cahier": "📖",
                "chat": "🐱", "chaton": "🐱",
                "lion": "🦁",
                "nébuleuse": null
            }"#,
        )
        .unwrap();

        let summary = summarize(&index);
        assert_eq!(summary.entries, 6);
        assert_eq!(summary.unique_emojis, 3);
        assert_eq!(
            summary.most_shared,
            vec![
                (
                    "📖".to_string(),
                    vec!["cahier".to_string(), "lire".to_string(), "livre".to_string()]
                ),
                (
                    "🐱".to_string(),
                    vec!["chat".to_string(), "chaton".to_string()]
                ),
            ]
        );
        assert_eq!(summary.samples[0], ("cahier".to_string(), "📖".to_string()));
    }

    #[test]
    fn empty_index_summarizes_to_zero() {
        let summary = summarize(&ResolutionIndex::new());
        assert_eq!(summary.entries, 0);
        assert!(summary.most_shared.is_empty());
        assert!(summary.samples.is_empty());
    }
}
