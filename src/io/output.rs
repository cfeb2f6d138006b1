use crate::core::{CatalogReport, ColumnSummary, GroupedSeries, PivotTable};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &CatalogReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &CatalogReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &CatalogReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_cleaning(report)?;
        self.write_numeric(&report.numeric)?;
        for series in &report.breakdowns {
            self.write_series(series)?;
        }
        for pivot in &report.pivots {
            self.write_pivot(pivot)?;
        }
        self.write_top_gain(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &CatalogReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Course Catalog Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Source: `{}`", report.source.display())?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_cleaning(&mut self, report: &CatalogReport) -> anyhow::Result<()> {
        let c = &report.cleaning;
        writeln!(self.writer, "## Cleaning Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Step | Rows |")?;
        writeln!(self.writer, "|------|------|")?;
        writeln!(self.writer, "| Rows read | {} |", c.rows_read)?;
        writeln!(self.writer, "| Exact duplicates removed | {} |", c.duplicates_removed)?;
        writeln!(self.writer, "| Dropped (missing url) | {} |", c.dropped_missing_url)?;
        match c.level_mode {
            Some(mode) => writeln!(
                self.writer,
                "| Levels imputed (mode: {mode}) | {} |",
                c.levels_imputed
            )?,
            None => writeln!(self.writer, "| Levels imputed | {} |", c.levels_imputed)?,
        }
        writeln!(self.writer, "| Costs zero-filled | {} |", c.costs_zero_filled)?;
        writeln!(self.writer, "| Rows out | {} |", c.rows_out)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_numeric(&mut self, columns: &[ColumnSummary]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Numeric Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Column | Count | Mean | Std | Min | Median | Max |")?;
        writeln!(self.writer, "|--------|-------|------|-----|-----|--------|-----|")?;
        for c in columns {
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
                c.column, c.count, c.mean, c.std, c.min, c.median, c.max
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_series(&mut self, series: &GroupedSeries) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", series.name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Group | Value{} |", series.unit)?;
        writeln!(self.writer, "|-------|-------|")?;
        for (label, value) in &series.rows {
            writeln!(self.writer, "| {label} | {value:.2} |")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_pivot(&mut self, pivot: &PivotTable) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", pivot.name)?;
        writeln!(self.writer)?;
        write!(self.writer, "| Year |")?;
        for column in &pivot.columns {
            write!(self.writer, " {column} |")?;
        }
        writeln!(self.writer)?;
        write!(self.writer, "|------|")?;
        for _ in &pivot.columns {
            write!(self.writer, "------|")?;
        }
        writeln!(self.writer)?;
        for (year, row) in pivot.years.iter().zip(&pivot.values) {
            write!(self.writer, "| {year} |")?;
            for value in row {
                write!(self.writer, " {value:.2} |")?;
            }
            writeln!(self.writer)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_top_gain(&mut self, report: &CatalogReport) -> anyhow::Result<()> {
        if report.top_gain.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Top Courses by Gain")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | Title | Category | Level | Subscribers | Gain |")?;
        writeln!(self.writer, "|---|-------|----------|-------|-------------|------|")?;
        for (i, course) in report.top_gain.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {:.2} |",
                i + 1,
                course.title,
                course.category,
                course.level,
                course.subscribers,
                course.gain
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &CatalogReport) -> anyhow::Result<()> {
        print_header(report);
        print_cleaning(report);
        print_numeric(&report.numeric);
        for series in &report.breakdowns {
            print_series(series);
        }
        for pivot in &report.pivots {
            print_pivot(pivot);
        }
        print_top_gain(report);
        Ok(())
    }
}

fn print_header(report: &CatalogReport) {
    println!("{}", "Course Catalog Report".bold().blue());
    println!("{}", "=====================".blue());
    println!("Source: {}", report.source.display());
    println!();
}

fn print_cleaning(report: &CatalogReport) {
    let c = &report.cleaning;
    println!("{} Cleaning:", "*".bold());
    println!("  Rows read: {}", c.rows_read);
    println!("  Duplicates removed: {}", c.duplicates_removed);
    println!("  Dropped for missing url: {}", c.dropped_missing_url);
    match c.level_mode {
        Some(mode) => println!("  Levels imputed: {} (mode: {})", c.levels_imputed, mode),
        None => println!("  Levels imputed: {}", c.levels_imputed),
    }
    println!("  Costs zero-filled: {}", c.costs_zero_filled);
    println!("  Rows out: {}", c.rows_out.to_string().green());
    println!();
}

fn print_numeric(columns: &[ColumnSummary]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Column", "Count", "Mean", "Std", "Min", "Median", "Max"]);
    for c in columns {
        table.add_row(vec![
            Cell::new(&c.column),
            Cell::new(c.count),
            Cell::new(format!("{:.2}", c.mean)),
            Cell::new(format!("{:.2}", c.std)),
            Cell::new(format!("{:.2}", c.min)),
            Cell::new(format!("{:.2}", c.median)),
            Cell::new(format!("{:.2}", c.max)),
        ]);
    }
    println!("{} Numeric summary:", "*".bold());
    println!("{table}");
    println!();
}

fn print_series(series: &GroupedSeries) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let value_header = if series.unit.is_empty() {
        "Value".to_string()
    } else {
        format!("Value ({})", series.unit)
    };
    table.set_header(vec!["Group", value_header.as_str()]);
    for (label, value) in &series.rows {
        table.add_row(vec![Cell::new(label), Cell::new(format!("{value:.2}"))]);
    }
    println!("{} {}:", "*".bold(), series.name.yellow());
    println!("{table}");
    println!();
}

fn print_pivot(pivot: &PivotTable) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["Year".to_string()];
    header.extend(pivot.columns.iter().cloned());
    table.set_header(header);
    for (year, row) in pivot.years.iter().zip(&pivot.values) {
        let mut cells = vec![year.to_string()];
        cells.extend(row.iter().map(|v| format!("{v:.2}")));
        table.add_row(cells);
    }
    println!("{} {}:", "*".bold(), pivot.name.yellow());
    println!("{table}");
    println!();
}

fn print_top_gain(report: &CatalogReport) {
    if report.top_gain.is_empty() {
        return;
    }
    println!(
        "{} Top {} courses by gain:",
        "*".bold(),
        report.top_gain.len()
    );
    for (i, course) in report.top_gain.iter().enumerate() {
        println!(
            "  {}. {} ({}, {}) - gain {}",
            i + 1,
            course.title.yellow(),
            course.category,
            course.level,
            format!("{:.2}", course.gain).green()
        );
    }
    println!();
}

/// Build a writer for the requested format. JSON and Markdown respect the
/// output path; the terminal writer always prints to stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    })
}
