use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::pipeline::Decision;

/// The stage that decided a word's outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Kept from a prior run.
    Prior,
    /// Manual override table.
    Override,
    /// Stop-word filter (explicit "no emoji").
    StopWord,
    /// Primary-locale name index.
    PrimaryName,
    /// Secondary-locale name index after translation.
    Translation,
    /// No stage answered.
    Unresolved,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Prior => "prior run",
            Stage::Override => "manual override",
            Stage::StopWord => "stop word",
            Stage::PrimaryName => "name index",
            Stage::Translation => "via translation",
            Stage::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-run counters. Reporting only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Entries considered (after the category filter).
    pub total: usize,
    /// Entries that ended with an emoji.
    pub resolved: usize,
    /// Entries resolved through the translation fallback.
    pub via_translation: usize,
    /// Entries per deciding stage.
    pub by_stage: BTreeMap<Stage, usize>,
}

impl ResolveStats {
    pub fn record(&mut self, decision: &Decision) {
        self.total += 1;
        if decision.resolution.emoji().is_some() {
            self.resolved += 1;
        }
        if decision.stage == Stage::Translation {
            self.via_translation += 1;
        }
        *self.by_stage.entry(decision.stage).or_default() += 1;
    }

    /// Count for one stage.
    pub fn stage(&self, stage: Stage) -> usize {
        self.by_stage.get(&stage).copied().unwrap_or(0)
    }

    /// Resolved share of considered entries, in percent.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.resolved as f64 * 100.0 / self.total as f64
    }
}
