//! Chart rendering: the original plotter's two-panel layout.
//!
//! ┌──────────────────────────────────────────────┐
//! │  Sensors                          [C]        │
//! │   ~~sensor00~~ ~~sensor01~~ ~~sensorMean~~   │
//! │   ~~moving average~~                         │
//! ├──────────────────────────────────────────────┤
//! │  Control Output                              │
//! │   __Fan__ ‾‾Heating element‾‾                │
//! ├──────────────────────────────────────────────┤
//! │  a: moving avg   m: mean line   q: quit      │
//! └──────────────────────────────────────────────┘

use ratatui::{prelude::*, widgets::*};

use super::app::{ChartApp, Trace, value_bounds};

const SENSOR_COLORS: [Color; 4] = [Color::Cyan, Color::Green, Color::Magenta, Color::Yellow];

pub fn draw(f: &mut Frame, app: &ChartApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // sensors
            Constraint::Length(10), // control output
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_sensors(f, rows[0], app);
    draw_controls(f, rows[1], app);
    draw_keys(f, rows[2]);
}

fn dataset<'a>(trace: &'a Trace, color: Color) -> Dataset<'a> {
    Dataset::default()
        .name(trace.label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&trace.points)
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Line<'static>> {
    vec![
        Line::from(format!("{:.1}", bounds[0])),
        Line::from(format!("{:.1}", bounds[1])),
    ]
}

fn draw_sensors(f: &mut Frame, area: Rect, app: &ChartApp) {
    let mut datasets: Vec<Dataset> = app
        .sensors()
        .iter()
        .zip(SENSOR_COLORS.iter().cycle())
        .map(|(t, &color)| dataset(t, color))
        .collect();
    if let Some(ma) = app.moving_average() {
        datasets.push(dataset(ma, Color::White));
    }
    if let Some(mean) = app.mean_line() {
        datasets.push(dataset(mean, Color::DarkGray));
    }

    let visible = app
        .sensors()
        .iter()
        .chain(app.moving_average())
        .chain(app.mean_line());
    let y_bounds = value_bounds(visible);

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(" Sensors "))
        .x_axis(
            Axis::default()
                .bounds(app.x_bounds())
                .labels(axis_labels(app.x_bounds())),
        )
        .y_axis(
            Axis::default()
                .title("Temperature [C]")
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    f.render_widget(chart, area);
}

fn draw_controls(f: &mut Frame, area: Rect, app: &ChartApp) {
    let datasets: Vec<Dataset> = app
        .controls()
        .iter()
        .zip([Color::Cyan, Color::Red])
        .map(|(t, color)| dataset(t, color))
        .collect();
    let y_bounds = value_bounds(app.controls().iter());

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Control Output "),
        )
        .x_axis(
            Axis::default()
                .title(app.x_title())
                .bounds(app.x_bounds())
                .labels(axis_labels(app.x_bounds())),
        )
        .y_axis(
            Axis::default()
                .title("Value")
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    f.render_widget(chart, area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(" a: moving average   m: mean line   q: quit")
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
