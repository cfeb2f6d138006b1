//! Exact-duplicate removal.
//!
//! A duplicate is a full-row match across every field, not just the course
//! id. The first occurrence of each group is kept, in input order. Identity
//! is a 64-bit hash of the canonical field encoding, with an equality check
//! inside each hash bucket so a collision can never drop a distinct row.

use crate::core::errors::Result;
use crate::core::{CleaningSummary, CourseRecord};
use crate::pipeline::stage::Stage;
use log::info;
use std::collections::HashMap;
use xxhash_rust::xxh64::xxh64;

pub struct Deduplicate;

impl Stage for Deduplicate {
    type Input = (Vec<CourseRecord>, CleaningSummary);
    type Output = (Vec<CourseRecord>, CleaningSummary);

    fn execute(&self, (records, mut summary): Self::Input) -> Result<Self::Output> {
        let before = records.len();
        let records = deduplicate(records);
        summary.duplicates_removed = before - records.len();
        if summary.duplicates_removed > 0 {
            info!("Removed {} exact duplicate rows", summary.duplicates_removed);
        }
        Ok((records, summary))
    }

    fn name(&self) -> &str {
        "deduplicate"
    }
}

pub fn deduplicate(records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut seen: HashMap<u64, Vec<CourseRecord>> = HashMap::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        let bucket = seen.entry(identity_hash(&record)).or_default();
        if bucket.iter().any(|prior| *prior == record) {
            continue;
        }
        bucket.push(record.clone());
        kept.push(record);
    }
    kept
}

/// Hash of every field in canonical form. Floats hash by bit pattern, the
/// timestamp by epoch seconds and subsecond nanos.
fn identity_hash(record: &CourseRecord) -> u64 {
    let mut buf = Vec::with_capacity(128);
    push_u64(&mut buf, record.course_id);
    push_str(&mut buf, &record.title);
    push_opt_str(&mut buf, record.url.as_deref());
    buf.push(record.is_paid as u8);
    push_u64(&mut buf, record.cost.map(f64::to_bits).unwrap_or(u64::MAX));
    buf.push(record.cost.is_some() as u8);
    push_u64(&mut buf, record.subscribers);
    push_u64(&mut buf, record.reviews);
    push_u64(&mut buf, record.lectures);
    buf.push(record.level.map(|l| l as u8 + 1).unwrap_or(0));
    push_u64(&mut buf, record.duration_hours.to_bits());
    push_u64(&mut buf, record.published_at.timestamp() as u64);
    push_u64(&mut buf, u64::from(record.published_at.timestamp_subsec_nanos()));
    push_str(&mut buf, &record.category);
    xxh64(&buf, 0)
}

fn push_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_str(buf: &mut Vec<u8>, value: &str) {
    push_u64(buf, value.len() as u64);
    buf.extend_from_slice(value.as_bytes());
}

fn push_opt_str(buf: &mut Vec<u8>, value: Option<&str>) {
    match value {
        Some(v) => {
            buf.push(1);
            push_str(buf, v);
        }
        None => buf.push(0),
    }
}
