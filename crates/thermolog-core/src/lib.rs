//! # thermolog-core
//!
//! Log-parsing and aggregation pipeline for temperated-box telemetry.
//!
//! The temperated box writes one JSON object per control-loop iteration,
//! interleaved with boot banners, debug chatter, and whatever else the serial
//! console picked up. This crate turns that noisy text into aligned numeric
//! time series plus rolling statistics, ready for a chart view.
//!
//! ## Quick Start
//!
//! ```no_run
//! use thermolog_core::PlotConfig;
//!
//! let config = PlotConfig {
//!     input: "box.log".into(),
//!     export: None,
//!     window: None,
//!     strict: false,
//! };
//! let data = thermolog_core::run(&config)?;
//! println!("mean of sensorMean: {:.3}", data.mean_of_means);
//! # Ok::<(), thermolog_core::ThermologError>(())
//! ```
//!
//! ## Pipeline
//!
//! Raw text → filter → decode → series extraction → rolling statistics
//!
//! Each stage owns its output and hands it to the next; nothing is shared or
//! mutated in place. Malformed lines are skipped with a visible warning
//! (lenient mode, the default) or abort the run (`strict`). Only an unreadable
//! input file or an input with zero valid records is fatal; export failures
//! and an oversized moving-average window degrade to [`PlotWarning`]s carried
//! in the result.

pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod record;
pub mod rolling;
pub mod series;

pub use error::{PlotWarning, ThermologError};
pub use export::{export_lines, export_to_path};
pub use filter::{RawLine, is_record_shaped, record_lines};
pub use pipeline::{PlotConfig, PlotData, run};
pub use record::{Channels, LogRecord, Timebase, decode_line, decode_records};
pub use rolling::{MovingAverage, moving_average, series_mean};
pub use series::{SeriesSet, extract};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
