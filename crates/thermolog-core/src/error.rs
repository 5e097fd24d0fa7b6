//! Error and warning taxonomy for the pipeline.
//!
//! Two tiers: [`ThermologError`] aborts the run, [`PlotWarning`] does not.
//! Warnings are values handed back to the caller for display, never printed
//! or swallowed inside the pipeline itself.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failures.
#[derive(Debug, Error)]
pub enum ThermologError {
    /// A record-shaped line that does not decode against any known schema.
    /// Fatal only in strict mode; lenient decoding downgrades this to
    /// [`PlotWarning::SkippedRecord`].
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Zero valid records, or a mean requested over an empty series.
    #[error("no valid records in input")]
    EmptyInput,

    /// The input file could not be read at all.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Non-fatal degradations. The run completes; the caller decides how loudly
/// to report these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotWarning {
    /// A malformed record was dropped during lenient decoding.
    #[error("line {line}: skipped malformed record: {reason}")]
    SkippedRecord { line: usize, reason: String },

    /// No trailing window fits the series; the moving-average output is all
    /// undefined markers.
    #[error("moving-average window of {window} exceeds the {samples} available samples")]
    WindowTooLarge { window: usize, samples: usize },

    /// The export destination could not be opened or written. Visualization
    /// proceeds regardless.
    #[error("export to {path} failed: {reason}")]
    ExportFailed { path: PathBuf, reason: String },
}
