//! Integration tests for thermolog-core.
//!
//! These run the whole pipeline against real files on disk:
//! raw text → filter → decode → series → rolling statistics → export.

use std::io::Write;
use std::num::NonZeroUsize;

use thermolog_core::{
    PlotConfig, ThermologError, decode_records, record_lines, run, series_mean,
};

/// One record line in the current two-channel ms schema.
fn record_line(ms: u64, mean: f64) -> String {
    format!(
        r#"{{"ms":{ms},"sensors":[{{"sensor00":20.0,"sensor01":21.0}}],"sensorMean":{mean},"fan":127,"heatingElement":0}}"#
    )
}

fn write_log(lines: &[String]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn five_record_scenario_end_to_end() {
    // The canonical fixture: five identical records, ms stepping by 1000.
    let lines: Vec<String> = (1..=5).map(|i| record_line(i * 1000, 20.5)).collect();
    let file = write_log(&lines);

    let data = run(&PlotConfig {
        input: file.path().to_path_buf(),
        export: None,
        window: None,
        strict: false,
    })
    .unwrap();

    assert_eq!(data.records, 5);
    assert_eq!(data.series.time, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(data.series.sensor_mean, vec![20.5; 5]);
    assert_eq!(data.mean_of_means, 20.5);
    for &fan in &data.series.fan {
        assert!((fan - 127.0 / 255.0).abs() < 1e-12);
    }
    assert!(data.warnings.is_empty());
}

#[test]
fn noisy_log_with_window_equal_to_record_count() {
    let mut lines = vec!["Temperated Box booting...".to_owned()];
    for (i, mean) in [20.0, 21.0, 22.0, 23.0].iter().enumerate() {
        lines.push(record_line((i as u64 + 1) * 1000, *mean));
        lines.push(format!("debug: loop {i} ok"));
    }
    let file = write_log(&lines);

    let data = run(&PlotConfig {
        input: file.path().to_path_buf(),
        export: None,
        window: NonZeroUsize::new(4),
        strict: false,
    })
    .unwrap();

    // Window == series length: exactly one defined value, equal to the
    // whole-series mean of the channel.
    let ma = data.moving_average.unwrap();
    let defined: Vec<f64> = ma.values.iter().flatten().copied().collect();
    assert_eq!(defined.len(), 1);
    assert_eq!(defined[0], series_mean(&data.series.sensor_mean).unwrap());
    assert_eq!(defined[0], data.mean_of_means);
}

#[test]
fn export_round_trips_through_filter_and_decoder() {
    let mut lines = vec!["boot noise".to_owned()];
    lines.extend((1..=3).map(|i| record_line(i * 1000, 20.5)));
    lines.push("shutdown".to_owned());
    let file = write_log(&lines);

    let export = tempfile::NamedTempFile::new().unwrap();
    let data = run(&PlotConfig {
        input: file.path().to_path_buf(),
        export: Some(export.path().to_path_buf()),
        window: None,
        strict: false,
    })
    .unwrap();
    assert_eq!(data.records, 3);
    assert!(data.warnings.is_empty());

    // Re-run the exported file through filter + decoder: identical records.
    let original_text = std::fs::read_to_string(file.path()).unwrap();
    let exported_text = std::fs::read_to_string(export.path()).unwrap();

    let (original, _) = decode_records(record_lines(&original_text), true).unwrap();
    let (reread, _) = decode_records(record_lines(&exported_text), true).unwrap();
    assert_eq!(original, reread);

    // And the exported bytes are exactly the filtered lines plus terminators.
    let expected: String = record_lines(&original_text)
        .map(|l| format!("{}\n", l.text))
        .collect();
    assert_eq!(exported_text, expected);
}

#[test]
fn legacy_tick_log_passes_time_through() {
    let lines: Vec<String> = (0..3)
        .map(|i| {
            format!(
                r#"{{"tick":{i},"sensors":[{{"sensor00":19.0,"sensor01":20.0}}],"sensorMean":19.5,"fan":0,"heatingElement":255}}"#
            )
        })
        .collect();
    let file = write_log(&lines);

    let data = run(&PlotConfig {
        input: file.path().to_path_buf(),
        export: None,
        window: None,
        strict: false,
    })
    .unwrap();

    assert_eq!(data.series.time, vec![0.0, 1.0, 2.0]);
    assert!(!data.series.time_in_seconds);
    assert_eq!(data.series.heating_element, vec![255.0; 3]);
}

#[test]
fn strict_mode_aborts_on_first_bad_record() {
    let lines = vec![
        record_line(1000, 20.5),
        r#"{"ms":2000,"sensors":[{"sensor01":1.0,"sensor02":2.0,"sensor03":3.0}],"sensorMean":2.0,"fan":0,"heatingElement":0}"#.to_owned(),
    ];
    let file = write_log(&lines);

    let err = run(&PlotConfig {
        input: file.path().to_path_buf(),
        export: None,
        window: None,
        strict: true,
    })
    .unwrap_err();

    assert!(matches!(err, ThermologError::MalformedRecord { line: 2, .. }));
}

#[test]
fn empty_file_reports_empty_input() {
    let file = write_log(&[]);
    let err = run(&PlotConfig {
        input: file.path().to_path_buf(),
        export: None,
        window: None,
        strict: false,
    })
    .unwrap_err();
    assert!(matches!(err, ThermologError::EmptyInput));
}
