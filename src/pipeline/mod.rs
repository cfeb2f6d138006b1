//! The cleaning pipeline: deduplicate, impute, derive.
//!
//! One-directional and single-pass: each stage consumes the previous stage's
//! table value and produces a new one, together with the running
//! `CleaningSummary`. The `Vec<Course>` coming out of the last stage is
//! treated as read-only by everything downstream.

pub mod dedupe;
pub mod derive;
pub mod impute;
pub mod stage;

pub use dedupe::Deduplicate;
pub use derive::DeriveColumns;
pub use impute::Impute;
pub use stage::{run_stage, Stage};

use crate::core::errors::Result;
use crate::core::{CleaningSummary, Course, CourseRecord};

/// Run the full pipeline over the raw record set.
pub fn run(records: Vec<CourseRecord>) -> Result<(Vec<Course>, CleaningSummary)> {
    let summary = CleaningSummary {
        rows_read: records.len(),
        ..CleaningSummary::default()
    };

    let state = run_stage(&Deduplicate, (records, summary))?;
    let state = run_stage(&Impute, state)?;
    run_stage(&DeriveColumns, state)
}
