//! Table formatting utilities for CLI output.

use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use lexmoji::{ResolveStats, Stage, SuggestReport};

/// Stages in the order they are consulted.
const STAGES: [Stage; 6] = [
    Stage::Override,
    Stage::StopWord,
    Stage::Prior,
    Stage::PrimaryName,
    Stage::Translation,
    Stage::Unresolved,
];

/// An emoji shared by several words.
pub struct SharedEmoji {
    pub emoji: String,
    pub words: Vec<String>,
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

/// Format the per-stage breakdown of a resolution run.
pub fn format_stage_table(stats: &ResolveStats) -> Table {
    let mut table = new_table(vec!["Source", "Words", "Share"]);
    for stage in STAGES {
        let count = stats.stage(stage);
        table.add_row(vec![
            stage.label().to_string(),
            count.to_string(),
            percent(count, stats.total),
        ]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Format the counters of a gap-filling run.
pub fn format_suggest_table(report: &SuggestReport) -> Table {
    let mut table = new_table(vec!["", "Count"]);
    let rows = [
        ("overrides applied", report.overridden),
        ("words requested", report.requested),
        ("batches sent", report.batches),
        ("failed batches", report.failed_batches),
        ("emojis added", report.added),
        ("declined", report.declined),
        ("rejected glyphs", report.rejected),
    ];
    for (label, count) in rows {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    table
}

/// Format the emojis shared by the most words.
pub fn format_shared_table(shared: &[SharedEmoji]) -> Table {
    let mut table = new_table(vec!["Emoji", "Words", "Examples"]);
    for entry in shared {
        let examples: Vec<&str> = entry.words.iter().take(5).map(String::as_str).collect();
        table.add_row(vec![
            entry.emoji.clone(),
            entry.words.len().to_string(),
            examples.join(", "),
        ]);
    }
    table
}
