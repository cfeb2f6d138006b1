use crate::config::Config;
use crate::core::CourseRecord;
use crate::io;
use crate::pipeline::dedupe;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::path::PathBuf;

pub struct ValidateConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
}

/// Data-quality findings over the raw catalog, before any imputation.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct QualityFindings {
    pub rows_read: usize,
    pub duplicate_rows: usize,
    pub null_url: usize,
    pub null_level: usize,
    pub null_cost: usize,
    /// Course ids with a null cost despite `is_paid = true`. The zero-fill
    /// rule is only valid when this list is empty.
    pub paid_null_cost: Vec<u64>,
}

impl QualityFindings {
    pub fn has_violations(&self) -> bool {
        !self.paid_null_cost.is_empty()
    }
}

pub fn inspect(records: &[CourseRecord]) -> QualityFindings {
    let deduped = dedupe::deduplicate(records.to_vec());
    QualityFindings {
        rows_read: records.len(),
        duplicate_rows: records.len() - deduped.len(),
        null_url: records.iter().filter(|r| r.url.is_none()).count(),
        null_level: records.iter().filter(|r| r.level.is_none()).count(),
        null_cost: records.iter().filter(|r| r.cost.is_none()).count(),
        paid_null_cost: records
            .iter()
            .filter(|r| r.cost.is_none() && r.is_paid)
            .map(|r| r.course_id)
            .collect(),
    }
}

pub fn handle_validate(validate: ValidateConfig) -> Result<()> {
    let config = Config::load(validate.config.as_deref())?;
    let records = io::read_records(&validate.path, &config.input)?;
    let findings = inspect(&records);

    println!("{}", "Catalog Quality Check".bold().blue());
    println!("  Rows read: {}", findings.rows_read);
    println!("  Exact duplicate rows: {}", findings.duplicate_rows);
    println!("  Null url: {}", findings.null_url);
    println!("  Null level: {}", findings.null_level);
    println!("  Null cost: {}", findings.null_cost);

    if findings.has_violations() {
        println!(
            "  {} paid courses with null cost: {:?}",
            "VIOLATION".red().bold(),
            findings.paid_null_cost
        );
        anyhow::bail!(
            "data integrity violation: {} paid course(s) with null cost",
            findings.paid_null_cost.len()
        );
    }

    println!("{} no integrity violations", "PASS".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;

    fn record(course_id: u64) -> CourseRecord {
        CourseRecord {
            course_id,
            title: "t".into(),
            url: Some("u".into()),
            is_paid: true,
            cost: Some(10.0),
            subscribers: 1,
            reviews: 0,
            lectures: 1,
            level: Some(Level::AllLevels),
            duration_hours: 1.0,
            published_at: "2016-01-01T00:00:00Z".parse().unwrap(),
            category: "Web Development".into(),
        }
    }

    #[test]
    fn counts_nulls_and_duplicates() {
        let rows = vec![
            record(1),
            record(1),
            CourseRecord {
                url: None,
                ..record(2)
            },
            CourseRecord {
                level: None,
                cost: None,
                is_paid: false,
                ..record(3)
            },
        ];
        let findings = inspect(&rows);
        assert_eq!(findings.rows_read, 4);
        assert_eq!(findings.duplicate_rows, 1);
        assert_eq!(findings.null_url, 1);
        assert_eq!(findings.null_level, 1);
        assert_eq!(findings.null_cost, 1);
        assert!(!findings.has_violations());
    }

    #[test]
    fn paid_null_cost_is_a_violation() {
        let rows = vec![CourseRecord {
            cost: None,
            is_paid: true,
            ..record(7)
        }];
        let findings = inspect(&rows);
        assert_eq!(findings.paid_null_cost, vec![7]);
        assert!(findings.has_violations());
    }

    #[test]
    fn clean_catalog_has_no_findings() {
        let findings = inspect(&[record(1), record(2)]);
        assert_eq!(findings, QualityFindings {
            rows_read: 2,
            ..QualityFindings::default()
        });
    }
}
