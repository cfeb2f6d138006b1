//! Pipeline and aggregation benchmarks over a synthetic catalog.

use chrono::{TimeZone, Utc};
use courselens::config::ReportConfig;
use courselens::{build_report, run_pipeline, CleaningSummary, CourseRecord, Level};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

const CATEGORIES: &[&str] = &[
    "Web Development",
    "Business Finance",
    "Graphic Design",
    "Musical Instruments",
];

const LEVELS: &[Level] = &[
    Level::AllLevels,
    Level::Beginner,
    Level::Intermediate,
    Level::Expert,
];

fn synthetic_catalog(size: usize) -> Vec<CourseRecord> {
    (0..size)
        .map(|i| CourseRecord {
            course_id: i as u64,
            title: format!("course {i}"),
            url: (i % 97 != 0).then(|| format!("https://example.com/{i}")),
            is_paid: i % 3 != 0,
            cost: if i % 3 != 0 {
                Some((i % 200) as f64)
            } else {
                None
            },
            subscribers: (i * 37 % 10_000) as u64,
            reviews: (i % 500) as u64,
            lectures: (i % 100 + 1) as u64,
            level: (i % 31 != 0).then(|| LEVELS[i % LEVELS.len()]),
            duration_hours: (i % 50) as f64 + 0.5,
            published_at: Utc
                .with_ymd_and_hms(2011 + (i % 7) as i32, 1 + (i % 12) as u32, 1, 0, 0, 0)
                .unwrap(),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let records = synthetic_catalog(10_000);
    c.bench_function("pipeline_10k_rows", |b| {
        b.iter(|| run_pipeline(black_box(records.clone())).unwrap());
    });
}

fn bench_report(c: &mut Criterion) {
    let (courses, _) = run_pipeline(synthetic_catalog(10_000)).unwrap();
    c.bench_function("report_10k_rows", |b| {
        b.iter(|| {
            build_report(
                Path::new("bench.csv"),
                black_box(&courses),
                CleaningSummary::default(),
                &ReportConfig::default(),
            )
        });
    });
}

criterion_group!(benches, bench_pipeline, bench_report);
criterion_main!(benches);
