//! On-disk record of one extraction run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use spategt_core::DataType;

/// JSON manifest written next to a feature table, capturing everything
/// needed to reproduce or audit the run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionManifest {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub data_type: DataType,
    pub seed: u64,
    pub min_count: usize,
    pub statistics: Vec<String>,
    pub processed: usize,
    pub skipped: SkipCounts,
}

/// Per-reason tally of excluded samples.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SkipCounts {
    pub missing_file: usize,
    pub extinct: usize,
    pub unknown_game: usize,
    pub statistic: usize,
}

impl SkipCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.missing_file + self.extinct + self.unknown_game + self.statistic
    }
}
