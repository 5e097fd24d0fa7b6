//! Series extractor: decoded records into index-aligned numeric series.
//!
//! Every vector in a [`SeriesSet`] has the same length as the input record
//! slice, and index `i` of every vector describes the same record.
//! Extraction never reorders or drops anything; channel uniformity was
//! already enforced at decode time.

use serde::Serialize;

use crate::error::ThermologError;
use crate::record::{LogRecord, Timebase};

/// Index-aligned time series for one log file. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet {
    /// Elapsed seconds for `ms` logs, raw tick count for legacy logs.
    pub time: Vec<f64>,
    /// Whether `time` is in seconds (false: legacy control-loop ticks).
    pub time_in_seconds: bool,
    /// `sensor00`, the lower probe.
    pub lower: Vec<f64>,
    /// `sensor01`, the upper probe.
    pub upper: Vec<f64>,
    /// `sensor02`, the outside probe, when the run has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside: Option<Vec<f64>>,
    /// Firmware-computed mean of the inside probes.
    pub sensor_mean: Vec<f64>,
    /// Fan drive as a 0–1 fraction of full scale.
    pub fan: Vec<f64>,
    /// Heating element drive, raw.
    pub heating_element: Vec<f64>,
}

impl SeriesSet {
    /// Number of samples; identical for every series in the set.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Build a [`SeriesSet`] from decoded records.
///
/// Time scaling: `ms` fields become elapsed seconds (÷ 1000); tick counters
/// pass through unscaled. Fan is normalized to a 0–1 fraction (÷ 255); the
/// heating element is kept raw.
pub fn extract(records: &[LogRecord]) -> Result<SeriesSet, ThermologError> {
    let first = records.first().ok_or(ThermologError::EmptyInput)?;

    let n = records.len();
    let mut set = SeriesSet {
        time: Vec::with_capacity(n),
        time_in_seconds: matches!(first.time, Timebase::Millis(_)),
        lower: Vec::with_capacity(n),
        upper: Vec::with_capacity(n),
        outside: first.channels.outside.map(|_| Vec::with_capacity(n)),
        sensor_mean: Vec::with_capacity(n),
        fan: Vec::with_capacity(n),
        heating_element: Vec::with_capacity(n),
    };

    for record in records {
        set.time.push(match record.time {
            Timebase::Millis(ms) => ms as f64 / 1000.0,
            Timebase::Ticks(t) => t as f64,
        });
        set.lower.push(record.channels.lower);
        set.upper.push(record.channels.upper);
        if let Some(outside) = set.outside.as_mut() {
            // Uniformity was checked at decode time; a hole here would be a
            // caller bug, and NaN propagates instead of faking a reading.
            outside.push(record.channels.outside.unwrap_or(f64::NAN));
        }
        set.sensor_mean.push(record.sensor_mean);
        set.fan.push(f64::from(record.fan) / 255.0);
        set.heating_element.push(f64::from(record.heating_element));
    }

    Ok(set)
}
