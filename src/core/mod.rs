pub mod errors;
pub mod stats;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Course difficulty level. The catalog uses a closed set of four values;
/// anything else in the level column is an ingestion error.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    AllLevels,
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "All Levels" => Some(Level::AllLevels),
            "Beginner Level" => Some(Level::Beginner),
            "Intermediate Level" => Some(Level::Intermediate),
            "Expert Level" => Some(Level::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::AllLevels => "All Levels",
            Level::Beginner => "Beginner Level",
            Level::Intermediate => "Intermediate Level",
            Level::Expert => "Expert Level",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw row of the source table, before cleaning. Nullable columns are
/// `Option`; everything else is assumed complete at ingestion.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CourseRecord {
    pub course_id: u64,
    pub title: String,
    pub url: Option<String>,
    pub is_paid: bool,
    pub cost: Option<f64>,
    pub subscribers: u64,
    pub reviews: u64,
    pub lectures: u64,
    pub level: Option<Level>,
    pub duration_hours: f64,
    pub published_at: DateTime<Utc>,
    pub category: String,
}

impl CourseRecord {
    /// Calendar year of the publication timestamp.
    pub fn published_year(&self) -> i32 {
        self.published_at.year()
    }
}

/// A cleaned course row: no nulls remain and the two derived columns are
/// populated. Frozen after the derive stage; aggregation reads it only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub course_id: u64,
    pub title: String,
    pub url: String,
    pub is_paid: bool,
    pub cost: f64,
    pub subscribers: u64,
    pub reviews: u64,
    pub lectures: u64,
    pub level: Level,
    pub duration_hours: f64,
    pub published_at: DateTime<Utc>,
    pub category: String,
    pub year: i32,
    pub gain: f64,
}

/// What the cleaning stages did to the raw set.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CleaningSummary {
    pub rows_read: usize,
    pub duplicates_removed: usize,
    pub dropped_missing_url: usize,
    pub levels_imputed: usize,
    pub level_mode: Option<Level>,
    pub costs_zero_filled: usize,
    pub rows_out: usize,
}

/// Describe-style summary for one numeric column.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// An ordered grouped series: one value per group label.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupedSeries {
    pub name: String,
    /// "%" for shares, "" for raw sums/counts/means.
    pub unit: String,
    pub rows: Vec<(String, f64)>,
}

impl GroupedSeries {
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|(_, v)| v).sum()
    }
}

/// Year-indexed cross-tab: rows are ascending years, columns a second key,
/// cells the aggregated metric with missing combinations zero-filled.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PivotTable {
    pub name: String,
    pub years: Vec<i32>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl PivotTable {
    pub fn cell(&self, year: i32, column: &str) -> Option<f64> {
        let r = self.years.iter().position(|&y| y == year)?;
        let c = self.columns.iter().position(|c| c == column)?;
        Some(self.values[r][c])
    }
}

/// One row of the top-by-gain ranking.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TopCourse {
    pub course_id: u64,
    pub title: String,
    pub category: String,
    pub level: Level,
    pub subscribers: u64,
    pub gain: f64,
}

/// The full report consumed by the output writers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogReport {
    pub source: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub cleaning: CleaningSummary,
    pub numeric: Vec<ColumnSummary>,
    pub breakdowns: Vec<GroupedSeries>,
    pub pivots: Vec<PivotTable>,
    pub top_gain: Vec<TopCourse>,
}
