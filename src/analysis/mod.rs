//! Read-only aggregation over the cleaned table.
//!
//! Everything here consumes the frozen `Vec<Course>` the pipeline produced.
//! The report sections are independent pure queries, so they are evaluated
//! in parallel; correctness never depends on that.

pub mod aggregate;
pub mod pivot;

pub use aggregate::{evaluate, AggFn, AggregationSpec, GroupKey, Metric, RowFilter};
pub use pivot::{evaluate_pivot, PivotSpec};

use crate::config::ReportConfig;
use crate::core::stats;
use crate::core::{CatalogReport, CleaningSummary, ColumnSummary, Course, TopCourse};
use chrono::Utc;
use log::debug;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::path::Path;

/// Top `n` courses by gain, descending. The sort is stable, so courses with
/// equal gain keep their original row order.
pub fn top_by_gain(courses: &[Course], n: usize) -> Vec<TopCourse> {
    let mut ranked: Vec<&Course> = courses.iter().collect();
    ranked.sort_by(|a, b| b.gain.partial_cmp(&a.gain).unwrap_or(Ordering::Equal));
    ranked
        .into_iter()
        .take(n)
        .map(|c| TopCourse {
            course_id: c.course_id,
            title: c.title.clone(),
            category: c.category.clone(),
            level: c.level,
            subscribers: c.subscribers,
            gain: c.gain,
        })
        .collect()
}

/// Describe-style summaries for the numeric columns (ids and lecture counts
/// are identifiers/noise and are left out).
pub fn numeric_summaries(courses: &[Course]) -> Vec<ColumnSummary> {
    let column = |name: &str, f: fn(&Course) -> f64| {
        let values: Vec<f64> = courses.iter().map(f).collect();
        stats::summarize(name, &values)
    };
    vec![
        column("cost", |c| c.cost),
        column("subscribers", |c| c.subscribers as f64),
        column("reviews", |c| c.reviews as f64),
        column("duration_hours", |c| c.duration_hours),
        column("gain", |c| c.gain),
    ]
}

/// The breakdowns the report always carries.
fn breakdown_specs(report: &ReportConfig) -> Vec<AggregationSpec> {
    let mut specs = vec![
        AggregationSpec::new(
            "Courses by category",
            GroupKey::Category,
            Metric::Courses,
            AggFn::Share,
        ),
        AggregationSpec::new(
            "Courses by level",
            GroupKey::Level,
            Metric::Courses,
            AggFn::Share,
        ),
        AggregationSpec::new(
            "Courses by year",
            GroupKey::Year,
            Metric::Courses,
            AggFn::Share,
        ),
        AggregationSpec::new(
            "Subscribers by paid status",
            GroupKey::Paid,
            Metric::Subscribers,
            AggFn::Share,
        ),
        AggregationSpec::new(
            "Zero-subscriber courses by category",
            GroupKey::Category,
            Metric::Courses,
            AggFn::Share,
        )
        .filtered(RowFilter::SubscribersEquals(0)),
    ];

    for &price in &report.price_points {
        specs.push(
            AggregationSpec::new(
                format!("Courses at cost {price} by category"),
                GroupKey::Category,
                Metric::Courses,
                AggFn::Share,
            )
            .filtered(RowFilter::CostEquals(price)),
        );
        specs.push(
            AggregationSpec::new(
                format!("Courses at cost {price} by level"),
                GroupKey::Level,
                Metric::Courses,
                AggFn::Share,
            )
            .filtered(RowFilter::CostEquals(price)),
        );
    }
    specs
}

fn pivot_specs() -> Vec<PivotSpec> {
    vec![
        PivotSpec::new("Subscribers by year", None, Metric::Subscribers, AggFn::Sum),
        PivotSpec::new(
            "Subscribers by year and category",
            Some(GroupKey::Category),
            Metric::Subscribers,
            AggFn::Sum,
        ),
        PivotSpec::new(
            "Subscribers by year and level",
            Some(GroupKey::Level),
            Metric::Subscribers,
            AggFn::Sum,
        ),
        PivotSpec::new(
            "Courses by year and category",
            Some(GroupKey::Category),
            Metric::Courses,
            AggFn::Count,
        ),
        PivotSpec::new(
            "Courses by year and level",
            Some(GroupKey::Level),
            Metric::Courses,
            AggFn::Count,
        ),
        PivotSpec::new(
            "Mean cost by year and category",
            Some(GroupKey::Category),
            Metric::Cost,
            AggFn::Mean,
        ),
        PivotSpec::new(
            "Mean cost by year and level",
            Some(GroupKey::Level),
            Metric::Cost,
            AggFn::Mean,
        ),
    ]
}

/// Assemble the full report from the frozen table.
pub fn build_report(
    source: &Path,
    courses: &[Course],
    cleaning: CleaningSummary,
    report: &ReportConfig,
) -> CatalogReport {
    let specs = breakdown_specs(report);
    let pivots = pivot_specs();
    debug!(
        "Evaluating {} breakdowns and {} pivots over {} rows",
        specs.len(),
        pivots.len(),
        courses.len()
    );

    let breakdowns = specs
        .par_iter()
        .map(|spec| evaluate(courses, spec))
        .collect();
    let pivots = pivots
        .par_iter()
        .map(|spec| evaluate_pivot(courses, spec))
        .collect();

    CatalogReport {
        source: source.to_path_buf(),
        timestamp: Utc::now(),
        cleaning,
        numeric: numeric_summaries(courses),
        breakdowns,
        pivots,
        top_gain: top_by_gain(courses, report.top_gain),
    }
}
