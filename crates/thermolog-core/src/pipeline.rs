//! Pipeline driver: one synchronous pass from file to plot-ready data.
//!
//! Read the file fully into memory, filter, optionally export, decode,
//! extract series, aggregate. Fatal outcomes are an unreadable input file
//! and zero valid records; everything else lands in `PlotData::warnings`.

use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use log::{debug, warn};

use crate::error::{PlotWarning, ThermologError};
use crate::export;
use crate::filter::record_lines;
use crate::record::decode_records;
use crate::rolling::{self, MovingAverage};
use crate::series::{self, SeriesSet};

/// Everything the run needs, handed in explicitly.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Path to the logfile to read.
    pub input: PathBuf,
    /// Re-export the filtered record lines here, best-effort.
    pub export: Option<PathBuf>,
    /// Trailing moving-average window; `None` disables the trace entirely.
    pub window: Option<NonZeroUsize>,
    /// Abort on the first malformed record instead of skipping it.
    pub strict: bool,
}

/// Plot-ready output of one pipeline run.
#[derive(Debug, Clone)]
pub struct PlotData {
    pub series: SeriesSet,
    /// Present iff a window was configured; may be all-sentinel (see its
    /// embedded warning) when the window did not fit.
    pub moving_average: Option<MovingAverage>,
    /// Whole-series arithmetic mean of the sensorMean channel.
    pub mean_of_means: f64,
    /// Number of valid records behind the series.
    pub records: usize,
    /// Everything that degraded along the way, in occurrence order.
    pub warnings: Vec<PlotWarning>,
}

/// Execute the full pipeline for `config`.
pub fn run(config: &PlotConfig) -> Result<PlotData, ThermologError> {
    let text = fs::read_to_string(&config.input).map_err(|source| ThermologError::Io {
        path: config.input.clone(),
        source,
    })?;

    let mut warnings = Vec::new();

    if let Some(dest) = &config.export {
        match export::export_to_path(dest, record_lines(&text)) {
            Ok(()) => debug!("exported filtered lines to {}", dest.display()),
            Err(e) => {
                warn!("export to {} failed: {e}", dest.display());
                warnings.push(PlotWarning::ExportFailed {
                    path: dest.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let (records, decode_warnings) = decode_records(record_lines(&text), config.strict)?;
    warnings.extend(decode_warnings);
    debug!(
        "decoded {} records from {}",
        records.len(),
        config.input.display()
    );

    let series = series::extract(&records)?;
    let mean_of_means = rolling::series_mean(&series.sensor_mean)?;

    let moving_average = config.window.map(|window| {
        let ma = rolling::moving_average(&series.sensor_mean, window);
        if let Some(warning) = &ma.warning {
            warnings.push(warning.clone());
        }
        ma
    });

    Ok(PlotData {
        moving_average,
        mean_of_means,
        records: series.len(),
        series,
        warnings,
    })
}
