//! Chart application state and event loop.
//!
//! The data is static (one finished pipeline run), so there is no refresh
//! tick or background work, just a draw loop waiting for key presses.
//! `a` and `m` toggle the moving-average trace and the flat mean line.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use thermolog_core::PlotData;

/// One named, plot-ready polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

fn trace(label: impl Into<String>, time: &[f64], values: &[f64]) -> Trace {
    Trace {
        label: label.into(),
        points: time.iter().copied().zip(values.iter().copied()).collect(),
    }
}

pub struct ChartApp {
    sensors: Vec<Trace>,
    /// Absent when no window was configured or no window fit the data.
    moving_average: Option<Trace>,
    mean_line: Trace,
    controls: Vec<Trace>,
    time_in_seconds: bool,
    x_bounds: [f64; 2],
    show_moving_average: bool,
    show_mean_line: bool,
    running: bool,
}

impl ChartApp {
    pub fn new(data: &PlotData) -> Self {
        let series = &data.series;
        let time = &series.time;

        let mut sensors = vec![
            trace("sensor00 (lower)", time, &series.lower),
            trace("sensor01 (upper)", time, &series.upper),
        ];
        if let Some(outside) = &series.outside {
            sensors.push(trace("sensor02 (outside)", time, outside));
        }
        sensors.push(trace("sensorMean", time, &series.sensor_mean));

        // Undefined leading entries are simply not plotted; an all-undefined
        // result leaves the trace out entirely.
        let moving_average = data.moving_average.as_ref().and_then(|ma| {
            let points: Vec<(f64, f64)> = time
                .iter()
                .copied()
                .zip(ma.values.iter().copied())
                .filter_map(|(t, v)| v.map(|v| (t, v)))
                .collect();
            (!points.is_empty()).then(|| Trace {
                label: format!("moving average, resolution: {}", ma.window),
                points,
            })
        });

        let mean = data.mean_of_means;
        let mean_line = Trace {
            label: format!("mean {mean:.3}"),
            points: vec![
                (time.first().copied().unwrap_or(0.0), mean),
                (time.last().copied().unwrap_or(0.0), mean),
            ],
        };

        let controls = vec![
            trace("Fan", time, &series.fan),
            trace("Heating element", time, &series.heating_element),
        ];

        let x_min = time.iter().copied().fold(f64::MAX, f64::min);
        let x_max = time.iter().copied().fold(f64::MIN, f64::max);
        let x_bounds = if x_min > x_max {
            [0.0, 1.0]
        } else if x_min == x_max {
            [x_min - 0.5, x_max + 0.5]
        } else {
            [x_min, x_max]
        };

        Self {
            sensors,
            moving_average,
            mean_line,
            controls,
            time_in_seconds: series.time_in_seconds,
            x_bounds,
            show_moving_average: true,
            show_mean_line: false,
            running: true,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('a') => self.show_moving_average = !self.show_moving_average,
            KeyCode::Char('m') => self.show_mean_line = !self.show_mean_line,
            _ => {}
        }
    }

    pub fn sensors(&self) -> &[Trace] {
        &self.sensors
    }

    /// The moving-average trace, when computed and currently shown.
    pub fn moving_average(&self) -> Option<&Trace> {
        self.show_moving_average
            .then_some(self.moving_average.as_ref())
            .flatten()
    }

    pub fn mean_line(&self) -> Option<&Trace> {
        self.show_mean_line.then_some(&self.mean_line)
    }

    pub fn controls(&self) -> &[Trace] {
        &self.controls
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub fn x_title(&self) -> &'static str {
        if self.time_in_seconds {
            "Seconds since start"
        } else {
            "Control ticks"
        }
    }
}

/// Padded y-axis bounds over every point of the given traces.
pub fn value_bounds<'a>(traces: impl Iterator<Item = &'a Trace>) -> [f64; 2] {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for t in traces {
        for &(_, y) in &t.points {
            min = min.min(y);
            max = max.max(y);
        }
    }
    if min > max {
        return [0.0, 1.0];
    }
    if min == max {
        return [min - 0.5, max + 0.5];
    }
    let pad = (max - min) * 0.05;
    [min - pad, max + pad]
}
