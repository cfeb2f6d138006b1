//! Year-indexed cross-tabs.
//!
//! Rows are ascending publication years, columns an optional second group
//! key, cells the aggregated metric. Combinations absent from the data are
//! zero-filled so every year carries every column.

use crate::analysis::aggregate::{AggFn, GroupKey, KeyValue, Metric};
use crate::core::stats::round2;
use crate::core::{Course, PivotTable};
use std::collections::BTreeMap;

/// Descriptor for one pivot. `columns: None` yields a single-column table
/// named after the metric (a plain per-year series). `AggFn::Share`
/// normalizes each cell against the whole table's total, as a percentage.
#[derive(Clone, Debug)]
pub struct PivotSpec {
    pub name: String,
    pub columns: Option<GroupKey>,
    pub metric: Metric,
    pub agg: AggFn,
}

impl PivotSpec {
    pub fn new(
        name: impl Into<String>,
        columns: Option<GroupKey>,
        metric: Metric,
        agg: AggFn,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            metric,
            agg,
        }
    }
}

pub fn evaluate_pivot(courses: &[Course], spec: &PivotSpec) -> PivotTable {
    let mut sums: BTreeMap<(i32, KeyValue), f64> = BTreeMap::new();
    let mut counts: BTreeMap<(i32, KeyValue), usize> = BTreeMap::new();
    let mut column_keys: BTreeMap<KeyValue, ()> = BTreeMap::new();
    let mut year_keys: BTreeMap<i32, ()> = BTreeMap::new();

    for course in courses {
        let column = match spec.columns {
            Some(key) => key.key_of(course),
            None => KeyValue::Category(spec.metric.label().to_string()),
        };
        year_keys.insert(course.year, ());
        column_keys.insert(column.clone(), ());
        let cell = (course.year, column);
        *sums.entry(cell.clone()).or_insert(0.0) += spec.metric.value_of(course);
        *counts.entry(cell).or_insert(0) += 1;
    }

    let years: Vec<i32> = year_keys.into_keys().collect();
    let columns: Vec<KeyValue> = column_keys.into_keys().collect();
    let grand_total: f64 = sums.values().sum();

    let values = years
        .iter()
        .map(|&year| {
            columns
                .iter()
                .map(|column| {
                    let cell = (year, column.clone());
                    match (sums.get(&cell), counts.get(&cell)) {
                        (Some(&sum), Some(&count)) => match spec.agg {
                            AggFn::Sum => sum,
                            AggFn::Count => count as f64,
                            AggFn::Mean => sum / count as f64,
                            AggFn::Share if grand_total > 0.0 => {
                                round2(sum / grand_total * 100.0)
                            }
                            AggFn::Share => 0.0,
                        },
                        // missing year/column combination
                        _ => 0.0,
                    }
                })
                .collect()
        })
        .collect();

    PivotTable {
        name: spec.name.clone(),
        years,
        columns: columns.iter().map(|c| c.to_string()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;

    fn course(year: i32, category: &str, subscribers: u64, cost: f64) -> Course {
        Course {
            course_id: 1,
            title: "t".into(),
            url: "u".into(),
            is_paid: cost > 0.0,
            cost,
            subscribers,
            reviews: 0,
            lectures: 1,
            level: Level::AllLevels,
            duration_hours: 1.0,
            published_at: format!("{year}-06-01T00:00:00Z").parse().unwrap(),
            category: category.into(),
            year,
            gain: cost * subscribers as f64,
        }
    }

    fn table() -> Vec<Course> {
        vec![
            course(2011, "Web Development", 500, 20.0),
            course(2012, "Web Development", 300, 40.0),
            course(2012, "Web Development", 100, 60.0),
            course(2012, "Business Finance", 200, 10.0),
        ]
    }

    #[test]
    fn subscribers_sum_year_by_category() {
        let spec = PivotSpec::new(
            "subs",
            Some(GroupKey::Category),
            Metric::Subscribers,
            AggFn::Sum,
        );
        let pivot = evaluate_pivot(&table(), &spec);
        assert_eq!(pivot.years, vec![2011, 2012]);
        assert_eq!(pivot.cell(2012, "Web Development"), Some(400.0));
        assert_eq!(pivot.cell(2012, "Business Finance"), Some(200.0));
    }

    #[test]
    fn missing_combinations_are_zero_filled() {
        let spec = PivotSpec::new(
            "subs",
            Some(GroupKey::Category),
            Metric::Subscribers,
            AggFn::Sum,
        );
        let pivot = evaluate_pivot(&table(), &spec);
        // no Business Finance rows in 2011
        assert_eq!(pivot.cell(2011, "Business Finance"), Some(0.0));
    }

    #[test]
    fn mean_cost_per_cell() {
        let spec = PivotSpec::new("cost", Some(GroupKey::Category), Metric::Cost, AggFn::Mean);
        let pivot = evaluate_pivot(&table(), &spec);
        assert_eq!(pivot.cell(2012, "Web Development"), Some(50.0));
    }

    #[test]
    fn course_count_per_cell() {
        let spec = PivotSpec::new(
            "count",
            Some(GroupKey::Category),
            Metric::Courses,
            AggFn::Count,
        );
        let pivot = evaluate_pivot(&table(), &spec);
        assert_eq!(pivot.cell(2012, "Web Development"), Some(2.0));
    }

    #[test]
    fn share_normalizes_against_the_table_total() {
        let spec = PivotSpec::new(
            "share",
            Some(GroupKey::Category),
            Metric::Subscribers,
            AggFn::Share,
        );
        let pivot = evaluate_pivot(&table(), &spec);
        // 1100 subscribers in total
        assert_eq!(pivot.cell(2011, "Web Development"), Some(45.45));
        assert_eq!(pivot.cell(2012, "Web Development"), Some(36.36));
        assert_eq!(pivot.cell(2012, "Business Finance"), Some(18.18));
        assert_eq!(pivot.cell(2011, "Business Finance"), Some(0.0));
    }

    #[test]
    fn no_column_key_gives_single_metric_column() {
        let spec = PivotSpec::new("subs by year", None, Metric::Subscribers, AggFn::Sum);
        let pivot = evaluate_pivot(&table(), &spec);
        assert_eq!(pivot.columns, vec!["subscribers".to_string()]);
        assert_eq!(pivot.cell(2012, "subscribers"), Some(600.0));
    }

    #[test]
    fn empty_input_gives_empty_pivot() {
        let spec = PivotSpec::new("subs", Some(GroupKey::Level), Metric::Subscribers, AggFn::Sum);
        let pivot = evaluate_pivot(&[], &spec);
        assert!(pivot.years.is_empty());
        assert!(pivot.columns.is_empty());
        assert!(pivot.values.is_empty());
    }
}
