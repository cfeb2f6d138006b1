//! Generic grouped aggregation.
//!
//! Every report breakdown is a declarative descriptor (group key, metric,
//! aggregation function, optional row filter) evaluated by one engine,
//! instead of a separate hand-written query per table.

use crate::core::stats::round2;
use crate::core::{Course, GroupedSeries, Level};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroupKey {
    Category,
    Level,
    Year,
    Paid,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Metric {
    /// Row count; the metric value of every row is 1.
    Courses,
    Subscribers,
    Cost,
    Gain,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Courses => "courses",
            Metric::Subscribers => "subscribers",
            Metric::Cost => "cost",
            Metric::Gain => "gain",
        }
    }

    pub(crate) fn value_of(&self, course: &Course) -> f64 {
        match self {
            Metric::Courses => 1.0,
            Metric::Subscribers => course.subscribers as f64,
            Metric::Cost => course.cost,
            Metric::Gain => course.gain,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum AggFn {
    Sum,
    Mean,
    Count,
    /// Per-group sum of the metric as a percentage of the grand total,
    /// rounded to two decimals. With `Metric::Courses` this is the share of
    /// rows; with `Metric::Subscribers` the share of subscribers.
    Share,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum RowFilter {
    CostEquals(f64),
    SubscribersEquals(u64),
}

impl RowFilter {
    fn matches(&self, course: &Course) -> bool {
        match self {
            RowFilter::CostEquals(cost) => course.cost == *cost,
            RowFilter::SubscribersEquals(n) => course.subscribers == *n,
        }
    }
}

/// One declarative breakdown: group rows by `key`, aggregate `metric` with
/// `agg`, over the rows passing `filter`.
#[derive(Clone, Debug)]
pub struct AggregationSpec {
    pub name: String,
    pub key: GroupKey,
    pub metric: Metric,
    pub agg: AggFn,
    pub filter: Option<RowFilter>,
}

impl AggregationSpec {
    pub fn new(name: impl Into<String>, key: GroupKey, metric: Metric, agg: AggFn) -> Self {
        Self {
            name: name.into(),
            key,
            metric,
            agg,
            filter: None,
        }
    }

    pub fn filtered(mut self, filter: RowFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Typed group label with a stable ordering (years numeric, levels in enum
/// order, categories alphabetical).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyValue {
    Paid(bool),
    Year(i32),
    Level(Level),
    Category(String),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Paid(true) => write!(f, "Paid"),
            KeyValue::Paid(false) => write!(f, "Free"),
            KeyValue::Year(y) => write!(f, "{y}"),
            KeyValue::Level(l) => write!(f, "{l}"),
            KeyValue::Category(c) => write!(f, "{c}"),
        }
    }
}

impl GroupKey {
    pub fn key_of(&self, course: &Course) -> KeyValue {
        match self {
            GroupKey::Category => KeyValue::Category(course.category.clone()),
            GroupKey::Level => KeyValue::Level(course.level),
            GroupKey::Year => KeyValue::Year(course.year),
            GroupKey::Paid => KeyValue::Paid(course.is_paid),
        }
    }
}

/// Evaluate one descriptor over the frozen table. Empty input (or a filter
/// matching nothing) produces an empty series, never an error.
pub fn evaluate(courses: &[Course], spec: &AggregationSpec) -> GroupedSeries {
    let mut sums: BTreeMap<KeyValue, f64> = BTreeMap::new();
    let mut counts: BTreeMap<KeyValue, usize> = BTreeMap::new();

    for course in courses {
        if let Some(filter) = &spec.filter {
            if !filter.matches(course) {
                continue;
            }
        }
        let key = spec.key.key_of(course);
        *sums.entry(key.clone()).or_insert(0.0) += spec.metric.value_of(course);
        *counts.entry(key).or_insert(0) += 1;
    }

    let grand_total: f64 = sums.values().sum();
    let mut rows: Vec<(String, f64)> = sums
        .iter()
        .map(|(key, &sum)| {
            let value = match spec.agg {
                AggFn::Sum => sum,
                AggFn::Count => counts[key] as f64,
                AggFn::Mean => sum / counts[key] as f64,
                AggFn::Share => {
                    if grand_total == 0.0 {
                        0.0
                    } else {
                        round2(sum / grand_total * 100.0)
                    }
                }
            };
            (key.to_string(), value)
        })
        .collect();

    // shares read best smallest-first, everything else in key order
    if spec.agg == AggFn::Share {
        rows.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    }

    GroupedSeries {
        name: spec.name.clone(),
        unit: if spec.agg == AggFn::Share { "%" } else { "" }.to_string(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;

    fn course(category: &str, level: Level, subscribers: u64, cost: f64) -> Course {
        Course {
            course_id: 1,
            title: "t".into(),
            url: "u".into(),
            is_paid: cost > 0.0,
            cost,
            subscribers,
            reviews: 0,
            lectures: 1,
            level,
            duration_hours: 1.0,
            published_at: "2016-01-01T00:00:00Z".parse().unwrap(),
            category: category.into(),
            year: 2016,
            gain: cost * subscribers as f64,
        }
    }

    fn table() -> Vec<Course> {
        vec![
            course("Web Development", Level::AllLevels, 100, 200.0),
            course("Web Development", Level::Beginner, 300, 0.0),
            course("Business Finance", Level::AllLevels, 50, 200.0),
            course("Graphic Design", Level::Expert, 50, 40.0),
        ]
    }

    #[test]
    fn sum_of_subscribers_by_category() {
        let spec = AggregationSpec::new("s", GroupKey::Category, Metric::Subscribers, AggFn::Sum);
        let series = evaluate(&table(), &spec);
        let web = series.rows.iter().find(|(k, _)| k == "Web Development").unwrap();
        assert_eq!(web.1, 400.0);
    }

    #[test]
    fn category_sum_round_trips_to_grand_total() {
        let courses = table();
        let spec = AggregationSpec::new("s", GroupKey::Category, Metric::Subscribers, AggFn::Sum);
        let series = evaluate(&courses, &spec);
        let total: u64 = courses.iter().map(|c| c.subscribers).sum();
        assert_eq!(series.total(), total as f64);
    }

    #[test]
    fn share_of_courses_by_level_sums_to_hundred() {
        let spec = AggregationSpec::new("s", GroupKey::Level, Metric::Courses, AggFn::Share);
        let series = evaluate(&table(), &spec);
        assert!((series.total() - 100.0).abs() < 0.05);
    }

    #[test]
    fn subscriber_share_by_paid_status() {
        let spec = AggregationSpec::new("s", GroupKey::Paid, Metric::Subscribers, AggFn::Share);
        let series = evaluate(&table(), &spec);
        let paid = series.rows.iter().find(|(k, _)| k == "Paid").unwrap();
        // 200 of 500 subscribers sit in paid courses
        assert_eq!(paid.1, 40.0);
    }

    #[test]
    fn filter_restricts_the_row_set() {
        let spec = AggregationSpec::new("s", GroupKey::Category, Metric::Courses, AggFn::Count)
            .filtered(RowFilter::CostEquals(200.0));
        let series = evaluate(&table(), &spec);
        assert_eq!(series.rows.len(), 2);
        assert_eq!(series.total(), 2.0);
    }

    #[test]
    fn mean_cost_by_category() {
        let spec = AggregationSpec::new("s", GroupKey::Category, Metric::Cost, AggFn::Mean);
        let series = evaluate(&table(), &spec);
        let web = series.rows.iter().find(|(k, _)| k == "Web Development").unwrap();
        assert_eq!(web.1, 100.0);
    }

    #[test]
    fn empty_table_yields_empty_series() {
        let spec = AggregationSpec::new("s", GroupKey::Year, Metric::Gain, AggFn::Sum);
        let series = evaluate(&[], &spec);
        assert!(series.rows.is_empty());
    }

    #[test]
    fn shares_are_sorted_ascending_by_value() {
        let spec = AggregationSpec::new("s", GroupKey::Category, Metric::Courses, AggFn::Share);
        let series = evaluate(&table(), &spec);
        let values: Vec<f64> = series.rows.iter().map(|(_, v)| *v).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, sorted);
    }
}
