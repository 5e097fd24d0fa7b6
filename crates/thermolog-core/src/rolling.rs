//! Rolling aggregator: trailing moving average and whole-series mean.
//!
//! The moving average keeps an incremental running sum, so a pass over tens
//! of thousands of samples costs O(n) rather than O(n·w). Indices before the
//! window first fills hold `None`, a real sentinel rather than a numeric zero
//! that would drag the plotted curve down.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::{PlotWarning, ThermologError};

/// Trailing moving average over one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverage {
    pub window: usize,
    /// Same length as the input; `None` where the window has not filled.
    pub values: Vec<Option<f64>>,
    /// Set when no window fit the series at all (`values` is all `None`).
    /// Non-fatal: the caller decides how to report it.
    #[serde(skip)]
    pub warning: Option<PlotWarning>,
}

/// Compute the trailing moving average of `series` with the given window.
///
/// Output index `i` holds the mean of `series[i-w+1..=i]` once `i >= w-1`
/// and `None` before that. A window larger than the series yields an
/// all-`None` result carrying [`PlotWarning::WindowTooLarge`] instead of
/// failing. NaN and infinity propagate per the usual float rules.
pub fn moving_average(series: &[f64], window: NonZeroUsize) -> MovingAverage {
    let w = window.get();
    let n = series.len();

    if w > n {
        return MovingAverage {
            window: w,
            values: vec![None; n],
            warning: Some(PlotWarning::WindowTooLarge {
                window: w,
                samples: n,
            }),
        };
    }

    let mut values = Vec::with_capacity(n);
    let mut sum = 0.0;
    for (i, &value) in series.iter().enumerate() {
        sum += value;
        if i >= w {
            sum -= series[i - w];
        }
        if i + 1 >= w {
            values.push(Some(sum / w as f64));
        } else {
            values.push(None);
        }
    }

    MovingAverage {
        window: w,
        values,
        warning: None,
    }
}

/// Arithmetic mean of a whole series.
pub fn series_mean(series: &[f64]) -> Result<f64, ThermologError> {
    if series.is_empty() {
        return Err(ThermologError::EmptyInput);
    }
    Ok(series.iter().sum::<f64>() / series.len() as f64)
}
