//! Catalog ingestion.
//!
//! Reads the semicolon-delimited course listing into typed records. Columns
//! arrive in a fixed order; `#`-prefixed comment lines are skipped. Nullable
//! columns (`url`, `level`, `cost`) map empty fields to `None`; a malformed
//! value anywhere else aborts the run with the offending line number.

use crate::config::InputConfig;
use crate::core::errors::{Error, Result};
use crate::core::{CourseRecord, Level};
use chrono::{DateTime, Utc};
use csv::StringRecord;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const EXPECTED_COLUMNS: usize = 12;

pub fn read_records(path: &Path, input: &InputConfig) -> Result<Vec<CourseRecord>> {
    let file = File::open(path).map_err(|e| {
        Error::Configuration(format!("Failed to open catalog '{}': {e}", path.display()))
    })?;
    let records = read_records_from(file, input)?;
    info!(
        "Loaded {} records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub fn read_records_from<R: Read>(reader: R, input: &InputConfig) -> Result<Vec<CourseRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(input.delimiter_byte())
        .comment(input.comment_byte())
        .has_headers(true)
        // keep ragged rows readable so the column check can report the line
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(parse_record(&row, line)?);
    }
    debug!("Parsed {} raw records", records.len());
    Ok(records)
}

fn parse_record(row: &StringRecord, line: u64) -> Result<CourseRecord> {
    if row.len() != EXPECTED_COLUMNS {
        return Err(Error::ingest(
            line,
            format!("expected {EXPECTED_COLUMNS} columns, found {}", row.len()),
        ));
    }

    Ok(CourseRecord {
        course_id: parse_field(row, 0, "course_id", line)?,
        title: required_text(row, 1, "title", line)?,
        url: optional_text(row, 2),
        is_paid: parse_bool(row, 3, "is_paid", line)?,
        cost: parse_cost(row, 4, line)?,
        subscribers: parse_field(row, 5, "subscribers", line)?,
        reviews: parse_field(row, 6, "reviews", line)?,
        lectures: parse_field(row, 7, "lectures", line)?,
        level: parse_level(row, 8, line)?,
        duration_hours: parse_duration(row, 9, line)?,
        published_at: parse_timestamp(row, 10, line)?,
        category: required_text(row, 11, "category", line)?,
    })
}

fn field<'a>(row: &'a StringRecord, idx: usize) -> &'a str {
    row.get(idx).unwrap_or("")
}

fn required_text(row: &StringRecord, idx: usize, name: &str, line: u64) -> Result<String> {
    let value = field(row, idx);
    if value.is_empty() {
        return Err(Error::ingest(line, format!("missing value for '{name}'")));
    }
    Ok(value.to_string())
}

fn optional_text(row: &StringRecord, idx: usize) -> Option<String> {
    let value = field(row, idx);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_field<T: std::str::FromStr>(
    row: &StringRecord,
    idx: usize,
    name: &str,
    line: u64,
) -> Result<T> {
    field(row, idx)
        .parse()
        .map_err(|_| Error::ingest(line, format!("invalid value for '{name}': '{}'", field(row, idx))))
}

fn parse_bool(row: &StringRecord, idx: usize, name: &str, line: u64) -> Result<bool> {
    let value = field(row, idx);
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::ingest(
            line,
            format!("invalid value for '{name}': '{value}'"),
        ))
    }
}

fn parse_cost(row: &StringRecord, idx: usize, line: u64) -> Result<Option<f64>> {
    let value = field(row, idx);
    if value.is_empty() {
        return Ok(None);
    }
    let cost: f64 = value
        .parse()
        .map_err(|_| Error::ingest(line, format!("invalid value for 'cost': '{value}'")))?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(Error::ingest(line, format!("cost out of range: {cost}")));
    }
    Ok(Some(cost))
}

fn parse_level(row: &StringRecord, idx: usize, line: u64) -> Result<Option<Level>> {
    let value = field(row, idx);
    if value.is_empty() {
        return Ok(None);
    }
    Level::parse(value)
        .map(Some)
        .ok_or_else(|| Error::ingest(line, format!("unknown level: '{value}'")))
}

fn parse_duration(row: &StringRecord, idx: usize, line: u64) -> Result<f64> {
    let duration: f64 = parse_field(row, idx, "duration", line)?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(Error::ingest(
            line,
            format!("duration out of range: {duration}"),
        ));
    }
    Ok(duration)
}

fn parse_timestamp(row: &StringRecord, idx: usize, line: u64) -> Result<DateTime<Utc>> {
    let value = field(row, idx);
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::ingest(line, format!("unparseable timestamp '{value}': {e}")))
}
