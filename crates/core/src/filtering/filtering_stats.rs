use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::person_counter::PersonCount;
use crate::shared::constants::STATS_FILE_NAME;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("failed to serialize filtering stats: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome counters for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: usize,
    pub one_person: usize,
    pub zero_people: usize,
    pub multiple_people: usize,
    pub errors: usize,
}

impl CategoryStats {
    pub fn record(&mut self, outcome: Option<PersonCount>) {
        self.total += 1;
        match outcome {
            Some(PersonCount::One) => self.one_person += 1,
            Some(PersonCount::Zero) => self.zero_people += 1,
            Some(PersonCount::Multiple) => self.multiple_people += 1,
            None => self.errors += 1,
        }
    }

    /// Percentage of processed images kept; 0 for an empty category.
    pub fn retention_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.one_person as f64 / self.total as f64 * 100.0
        }
    }
}

/// Aggregate result of a filter run, persisted as `filtering_stats.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteringStats {
    pub total_processed: usize,
    pub one_person: usize,
    pub zero_people: usize,
    pub multiple_people: usize,
    pub errors: usize,
    pub by_type: BTreeMap<String, CategoryStats>,
}

impl FilteringStats {
    /// Count one image. `None` means the detector failed on it.
    pub fn record(&mut self, category: &str, outcome: Option<PersonCount>) {
        self.total_processed += 1;
        match outcome {
            Some(PersonCount::One) => self.one_person += 1,
            Some(PersonCount::Zero) => self.zero_people += 1,
            Some(PersonCount::Multiple) => self.multiple_people += 1,
            None => self.errors += 1,
        }
        self.by_type
            .entry(category.to_string())
            .or_default()
            .record(outcome);
    }

    /// Register a category so it appears in the output even with no images.
    pub fn ensure_category(&mut self, category: &str) {
        self.by_type.entry(category.to_string()).or_default();
    }

    pub fn retention_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            self.one_person as f64 / self.total_processed as f64 * 100.0
        }
    }

    /// Writes pretty-printed JSON to `<output_root>/filtering_stats.json`.
    pub fn write_json(&self, output_root: &Path) -> Result<PathBuf, StatsError> {
        let path = output_root.join(STATS_FILE_NAME);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|e| StatsError::Write {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Per-category retention table followed by overall totals.
    pub fn summary_string(&self) -> String {
        let mut lines = vec![
            format!(
                "{:<8} {:>8} {:>8} {:>10}",
                "Type", "Total", "Kept", "Retention"
            ),
            "-".repeat(37),
        ];
        for (category, stats) in &self.by_type {
            lines.push(format!(
                "{:<8} {:>8} {:>8} {:>9.1}%",
                category,
                stats.total,
                stats.one_person,
                stats.retention_rate()
            ));
        }
        lines.push("-".repeat(37));
        lines.push(format!(
            "{:<8} {:>8} {:>8} {:>9.1}%",
            "TOTAL",
            self.total_processed,
            self.one_person,
            self.retention_rate()
        ));
        lines.push(format!(
            "Removed: {} with no people, {} with multiple people, {} errors",
            self.zero_people, self.multiple_people, self.errors
        ));
        lines.join("\n")
    }
}
