// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{
    CatalogReport, CleaningSummary, ColumnSummary, Course, CourseRecord, GroupedSeries, Level,
    PivotTable, TopCourse,
};

pub use crate::core::errors::{Error, Result};

pub use crate::analysis::{
    build_report, evaluate, evaluate_pivot, top_by_gain, AggFn, AggregationSpec, GroupKey, Metric,
    PivotSpec, RowFilter,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::io::reader::{read_records, read_records_from};

pub use crate::pipeline::run as run_pipeline;
