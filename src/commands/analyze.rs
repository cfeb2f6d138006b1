use crate::config::Config;
use crate::{analysis, cli, io, pipeline};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub config: Option<PathBuf>,
}

pub fn handle_analyze(analyze: AnalyzeConfig) -> Result<()> {
    let mut config = Config::load(analyze.config.as_deref())?;
    if let Some(top) = analyze.top {
        config.report.top_gain = top;
    }

    let records = io::read_records(&analyze.path, &config.input)
        .with_context(|| format!("reading {}", analyze.path.display()))?;
    let (courses, cleaning) = pipeline::run(records)?;
    info!(
        "Pipeline complete: {} of {} rows survived cleaning",
        cleaning.rows_out, cleaning.rows_read
    );

    let report = analysis::build_report(&analyze.path, &courses, cleaning, &config.report);

    let mut writer = io::create_writer(analyze.format.into(), analyze.output.as_deref())?;
    writer.write_report(&report)?;
    Ok(())
}
