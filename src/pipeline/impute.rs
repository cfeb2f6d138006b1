//! Null handling.
//!
//! Rules run in a fixed order over the deduplicated set:
//! 1. rows with a null `url` are dropped, there is no defensible substitute
//!    for a missing link;
//! 2. null `level` takes the modal observed level (ties go to the level seen
//!    first in the data);
//! 3. null `cost` becomes 0, but only after verifying every null-cost row is
//!    a free course. A paid course without a cost is a data-integrity error,
//!    not something to zero-fill.
//!
//! Running the imputer on an already-clean set changes nothing.

use crate::core::errors::{Error, Result};
use crate::core::{CleaningSummary, CourseRecord, Level};
use crate::pipeline::stage::Stage;
use log::info;
use std::collections::HashMap;

pub struct Impute;

impl Stage for Impute {
    type Input = (Vec<CourseRecord>, CleaningSummary);
    type Output = (Vec<CourseRecord>, CleaningSummary);

    fn execute(&self, (records, mut summary): Self::Input) -> Result<Self::Output> {
        let before = records.len();
        let records = drop_missing_url(records);
        summary.dropped_missing_url = before - records.len();

        let (records, mode, imputed) = impute_level(records)?;
        summary.level_mode = mode;
        summary.levels_imputed = imputed;

        let (records, zero_filled) = impute_cost(records)?;
        summary.costs_zero_filled = zero_filled;

        info!(
            "Imputation: dropped {} url-less rows, filled {} levels, zero-filled {} costs",
            summary.dropped_missing_url, summary.levels_imputed, summary.costs_zero_filled
        );
        Ok((records, summary))
    }

    fn name(&self) -> &str {
        "impute"
    }
}

fn drop_missing_url(records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    records.into_iter().filter(|r| r.url.is_some()).collect()
}

/// Replace null levels with the most frequent observed level. Returns the
/// mode used (None when the set had no nulls to fill) and the fill count.
fn impute_level(
    records: Vec<CourseRecord>,
) -> Result<(Vec<CourseRecord>, Option<Level>, usize)> {
    let nulls = records.iter().filter(|r| r.level.is_none()).count();
    if nulls == 0 {
        return Ok((records, None, 0));
    }

    let mode = modal_level(&records).ok_or_else(|| {
        Error::integrity("cannot impute level: no non-null level observed in the data")
    })?;

    let records = records
        .into_iter()
        .map(|mut r| {
            if r.level.is_none() {
                r.level = Some(mode);
            }
            r
        })
        .collect();
    Ok((records, Some(mode), nulls))
}

/// Most frequent non-null level; ties break toward the level encountered
/// first in row order.
fn modal_level(records: &[CourseRecord]) -> Option<Level> {
    let mut counts: HashMap<Level, usize> = HashMap::new();
    let mut first_seen: Vec<Level> = Vec::new();

    for level in records.iter().filter_map(|r| r.level) {
        if !first_seen.contains(&level) {
            first_seen.push(level);
        }
        *counts.entry(level).or_insert(0) += 1;
    }

    let mut best: Option<Level> = None;
    for level in first_seen {
        if best.map_or(true, |b| counts[&level] > counts[&b]) {
            best = Some(level);
        }
    }
    best
}

/// Zero-fill null costs after checking the free-course precondition.
fn impute_cost(records: Vec<CourseRecord>) -> Result<(Vec<CourseRecord>, usize)> {
    let violations: Vec<u64> = records
        .iter()
        .filter(|r| r.cost.is_none() && r.is_paid)
        .map(|r| r.course_id)
        .collect();
    if !violations.is_empty() {
        return Err(Error::integrity(format!(
            "paid courses with null cost (cannot zero-fill): {violations:?}"
        )));
    }

    let mut zero_filled = 0;
    let records = records
        .into_iter()
        .map(|mut r| {
            if r.cost.is_none() {
                r.cost = Some(0.0);
                zero_filled += 1;
            }
            r
        })
        .collect();
    Ok((records, zero_filled))
}
