//! Terminal chart view, the presentation side of the pipeline.
//!
//! The core crate hands over a finished [`thermolog_core::PlotData`]; this
//! module only draws it. Nothing here feeds back into the pipeline.

pub mod app;
pub mod ui;
