//! CLI for thermolog: reads a temperated-box logfile and plots the graphs.

mod chart;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::Parser;

use thermolog_core::{MovingAverage, PlotConfig, PlotData, SeriesSet};

#[derive(Parser)]
#[command(name = "thermolog")]
#[command(about = "Reads a logfile for the temperated box and plots the relevant graphs")]
#[command(version = thermolog_core::VERSION)]
struct Cli {
    /// Path to the logfile to be read
    #[arg(value_name = "PATH")]
    filepath: PathBuf,

    /// Save the extracted record lines to a file
    #[arg(long, value_name = "PATH")]
    extract: Option<PathBuf>,

    /// Trailing moving-average window size; omit to disable the trace
    #[arg(long, value_name = "SAMPLES")]
    window: Option<NonZeroUsize>,

    /// Write the extracted series and statistics as JSON
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Abort on the first malformed record instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Skip the interactive chart view
    #[arg(long)]
    no_chart: bool,
}

/// Machine-readable run report for `--output`.
#[derive(serde::Serialize)]
struct Report<'a> {
    records: usize,
    mean_of_means: f64,
    series: &'a SeriesSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    moving_average: Option<&'a MovingAverage>,
    warnings: Vec<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = PlotConfig {
        input: cli.filepath,
        export: cli.extract,
        window: cli.window,
        strict: cli.strict,
    };

    let data = match thermolog_core::run(&config) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for warning in &data.warnings {
        eprintln!("Warning: {warning}");
    }
    println!(
        "The average of sensorMean over {} records is {:.3}",
        data.records, data.mean_of_means
    );

    if let Some(path) = &cli.output {
        write_report(path, &data);
    }

    if !cli.no_chart {
        let mut app = chart::app::ChartApp::new(&data);
        if let Err(e) = app.run() {
            eprintln!("Chart error: {e}");
            std::process::exit(1);
        }
    }
}

fn write_report(path: &Path, data: &PlotData) {
    let report = Report {
        records: data.records,
        mean_of_means: data.mean_of_means,
        series: &data.series,
        moving_average: data.moving_average.as_ref(),
        warnings: data.warnings.iter().map(ToString::to_string).collect(),
    };
    match std::fs::write(path, serde_json::to_string_pretty(&report).unwrap()) {
        Ok(()) => println!("Report written to {}", path.display()),
        Err(e) => eprintln!("Warning: failed to write {}: {e}", path.display()),
    }
}
