//! Record decoder: one filtered line into a typed [`LogRecord`].
//!
//! Three wire schemas exist in the field, distinguished purely by which keys
//! are present:
//!
//! 1. current firmware: `ms` elapsed time plus a third outside channel,
//! 2. two-channel `ms` logs from before the outside probe was fitted,
//! 3. legacy logs with a `tick` loop counter instead of `ms`.
//!
//! Decoding tries the schemas in that fixed order and takes the first
//! structural match (`#[serde(untagged)]`). Each line is self-describing;
//! no external schema file is consulted, and no state is shared between
//! calls.
//!
//! Channel naming is a contract: only `sensor00`/`sensor01`(/`sensor02`) are
//! accepted. Some firmware builds were seen emitting `sensor01..sensor03`
//! instead; those lines fail decode loudly rather than being silently
//! re-indexed, until the naming question is settled upstream.

use log::warn;
use serde::Deserialize;

use crate::error::{PlotWarning, ThermologError};
use crate::filter::RawLine;

/// Time axis variants across firmware generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timebase {
    /// Milliseconds since device boot.
    Millis(u64),
    /// Control-loop iteration counter from legacy firmware.
    Ticks(u64),
}

/// Temperature readings for one record. `outside` is present on boxes with
/// the third probe fitted; presence is uniform within a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channels {
    /// `sensor00`, the probe below the heating element.
    pub lower: f64,
    /// `sensor01`, the probe at the top of the box.
    pub upper: f64,
    /// `sensor02`, the ambient probe outside the box.
    pub outside: Option<f64>,
}

/// One decoded observation of sensor and actuator state.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time: Timebase,
    pub channels: Channels,
    /// Firmware-computed mean of the inside probes.
    pub sensor_mean: f64,
    /// Fan drive, raw 0–255.
    pub fan: u8,
    /// Heating element drive, raw (0 or 255 in practice).
    pub heating_element: u8,
}

// Wire-level shapes. Unknown top-level keys (setpoint, dutycycle, ...) are
// tolerated; unknown channel keys are not (see the module docs).

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ThreeChannels {
    sensor00: f64,
    sensor01: f64,
    sensor02: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TwoChannels {
    sensor00: f64,
    sensor01: f64,
}

/// Schema priority order lives in the variant order here.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireRecord {
    MillisThree {
        ms: u64,
        sensors: [ThreeChannels; 1],
        #[serde(rename = "sensorMean")]
        sensor_mean: f64,
        fan: u8,
        #[serde(rename = "heatingElement")]
        heating_element: u8,
    },
    MillisTwo {
        ms: u64,
        sensors: [TwoChannels; 1],
        #[serde(rename = "sensorMean")]
        sensor_mean: f64,
        fan: u8,
        #[serde(rename = "heatingElement")]
        heating_element: u8,
    },
    TickTwo {
        tick: u64,
        sensors: [TwoChannels; 1],
        #[serde(rename = "sensorMean")]
        sensor_mean: f64,
        fan: u8,
        #[serde(rename = "heatingElement")]
        heating_element: u8,
    },
}

impl From<WireRecord> for LogRecord {
    fn from(wire: WireRecord) -> Self {
        match wire {
            WireRecord::MillisThree {
                ms,
                sensors: [c],
                sensor_mean,
                fan,
                heating_element,
            } => LogRecord {
                time: Timebase::Millis(ms),
                channels: Channels {
                    lower: c.sensor00,
                    upper: c.sensor01,
                    outside: Some(c.sensor02),
                },
                sensor_mean,
                fan,
                heating_element,
            },
            WireRecord::MillisTwo {
                ms,
                sensors: [c],
                sensor_mean,
                fan,
                heating_element,
            } => LogRecord {
                time: Timebase::Millis(ms),
                channels: Channels {
                    lower: c.sensor00,
                    upper: c.sensor01,
                    outside: None,
                },
                sensor_mean,
                fan,
                heating_element,
            },
            WireRecord::TickTwo {
                tick,
                sensors: [c],
                sensor_mean,
                fan,
                heating_element,
            } => LogRecord {
                time: Timebase::Ticks(tick),
                channels: Channels {
                    lower: c.sensor00,
                    upper: c.sensor01,
                    outside: None,
                },
                sensor_mean,
                fan,
                heating_element,
            },
        }
    }
}

/// Decode a single filtered line. Pure: no shared state, no side effects.
pub fn decode_line(line: &RawLine<'_>) -> Result<LogRecord, ThermologError> {
    serde_json::from_str::<WireRecord>(line.text)
        .map(LogRecord::from)
        .map_err(|e| ThermologError::MalformedRecord {
            line: line.number,
            reason: e.to_string(),
        })
}

/// Decode a filtered line sequence into records.
///
/// Strict mode propagates the first failure. Lenient mode skips the bad
/// record and reports it as a [`PlotWarning::SkippedRecord`] instead.
///
/// Batch uniformity is enforced here: a record whose channel set or
/// timebase differs from the first accepted record's is treated as
/// malformed, so the series extractor downstream can rely on every record
/// carrying the same channels and a single time axis (a file mixing `ms`
/// and `tick` records would otherwise plot seconds against raw ticks).
pub fn decode_records<'a>(
    lines: impl Iterator<Item = RawLine<'a>>,
    strict: bool,
) -> Result<(Vec<LogRecord>, Vec<PlotWarning>), ThermologError> {
    let mut records: Vec<LogRecord> = Vec::new();
    let mut warnings = Vec::new();

    for line in lines {
        let result = decode_line(&line).and_then(|record| match records.first() {
            Some(first)
                if first.channels.outside.is_some() != record.channels.outside.is_some() =>
            {
                Err(ThermologError::MalformedRecord {
                    line: line.number,
                    reason: "channel set differs from earlier records".into(),
                })
            }
            Some(first)
                if std::mem::discriminant(&first.time)
                    != std::mem::discriminant(&record.time) =>
            {
                Err(ThermologError::MalformedRecord {
                    line: line.number,
                    reason: "timebase differs from earlier records".into(),
                })
            }
            _ => Ok(record),
        });

        match result {
            Ok(record) => records.push(record),
            Err(e) if strict => return Err(e),
            Err(ThermologError::MalformedRecord { line, reason }) => {
                warn!("line {line}: skipping malformed record: {reason}");
                warnings.push(PlotWarning::SkippedRecord { line, reason });
            }
            // decode_line only produces MalformedRecord.
            Err(e) => return Err(e),
        }
    }

    Ok((records, warnings))
}
