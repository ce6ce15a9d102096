//! CLI definition and pipeline orchestration.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{CsvAdapter, DEFAULT_INPUT_PATH};
use crate::adapters::svg_chart_adapter::{SvgChartAdapter, DEFAULT_OUTPUT_PATH};
use crate::adapters::system_viewer::SystemViewer;
use crate::domain::analysis::{analyze, AnalysisConfig};
use crate::domain::error::StockvizError;
use crate::domain::synthetic::rng_from_seed;
use crate::ports::chart_port::ChartPort;
use crate::ports::data_port::PriceSource;
use crate::ports::display_port::DisplayPort;

#[derive(Parser, Debug)]
#[command(
    name = "stockviz",
    about = "Chart daily closing prices with a 7-day average and local extrema"
)]
pub struct Cli {
    /// CSV file with Date and Close columns
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Seed for the sample data generator
    #[arg(long, hide = true)]
    pub seed: Option<u64>,
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub generated: bool,
    pub rows: usize,
    pub peaks: usize,
    pub troughs: usize,
    pub max_close: f64,
    pub output_path: PathBuf,
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging();

    let mut source = CsvAdapter::new(cli.input, rng_from_seed(cli.seed));
    let chart = SvgChartAdapter::new();
    let viewer = SystemViewer::new();

    match run_pipeline(
        &mut source,
        &chart,
        &viewer,
        Path::new(DEFAULT_OUTPUT_PATH),
        &AnalysisConfig::default(),
    ) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Quiet unless something goes wrong; `RUST_LOG=info` shows pipeline progress.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Logs go to stderr; `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load, analyze, render, display.
pub fn run_pipeline(
    source: &mut dyn PriceSource,
    chart: &dyn ChartPort,
    display: &dyn DisplayPort,
    output_path: &Path,
    config: &AnalysisConfig,
) -> Result<RunSummary, StockvizError> {
    // Stage 1: Load
    let outcome = source.load()?;
    let generated = outcome.is_generated();
    let series = outcome.into_series();

    // Stage 2: Analyze
    let analyzed = analyze(&series, config)?;
    let max = analyzed.global_max();
    let summary = RunSummary {
        generated,
        rows: analyzed.len(),
        peaks: analyzed.peaks().count(),
        troughs: analyzed.troughs().count(),
        max_close: max.close,
        output_path: output_path.to_path_buf(),
    };
    info!(
        rows = summary.rows,
        peaks = summary.peaks,
        troughs = summary.troughs,
        max_close = summary.max_close,
        max_date = %max.date,
        "analysis complete"
    );

    // Stage 3: Render and show
    chart.render(&analyzed, output_path)?;
    display.show(output_path)?;

    Ok(summary)
}
