//! Figure and pie chart rendering with plotters.

use chrono::DateTime;
use insight_core::error::ExportError;
use insight_signals::{Figure, LineStyle, Panel, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, warn};

fn chart_error<E: Display>(step: &'static str) -> impl Fn(E) -> ExportError {
    move |e| ExportError::Chart(format!("Failed to {}: {}", step, e))
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// Render a figure to `path`. `.svg` selects the vector backend, anything
/// else is written as a bitmap.
pub fn render_figure(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<(), ExportError> {
    if figure.panels.is_empty() || figure.timestamps.is_empty() {
        return Err(ExportError::Empty(figure.title.clone()));
    }

    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    debug!(path = %path.display(), svg = is_svg, panels = figure.panels.len(), "Rendering figure");

    if is_svg {
        draw_figure(SVGBackend::new(path, size).into_drawing_area(), figure)
    } else {
        draw_figure(BitMapBackend::new(path, size).into_drawing_area(), figure)
    }
}

fn draw_figure<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), ExportError> {
    root.fill(&WHITE).map_err(chart_error("fill background"))?;

    // Price panel takes twice the height of each indicator panel
    let (_, height) = root.dim_in_pixel();
    let weight = figure.panels.len() as u32 + 1;
    let price_height = height * 2 / weight;

    if figure.panels.len() == 1 {
        draw_panel(&root, &figure.panels[0], &figure.timestamps)?;
    } else {
        let (upper, lower) = root.split_vertically(price_height);
        draw_panel(&upper, &figure.panels[0], &figure.timestamps)?;

        let rest = &figure.panels[1..];
        for (area, panel) in lower.split_evenly((rest.len(), 1)).iter().zip(rest) {
            draw_panel(area, panel, &figure.timestamps)?;
        }
    }

    root.present().map_err(chart_error("write chart"))?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    timestamps: &[i64],
) -> Result<(), ExportError> {
    let (x_min, x_max) = time_range(timestamps);
    let (y_min, y_max) = value_range(panel.y_range().unwrap_or((0.0, 1.0)));

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(chart_error("build chart"))?;

    chart
        .configure_mesh()
        .x_labels(8)
        .y_desc(panel.y_label.as_str())
        .x_label_formatter(&format_timestamp)
        .draw()
        .map_err(chart_error("draw mesh"))?;

    for guide in &panel.guides {
        let style = color(guide.color).mix(0.6).stroke_width(1);
        chart
            .draw_series(LineSeries::new([(x_min, guide.y), (x_max, guide.y)], style))
            .map_err(chart_error("draw guide"))?;
    }

    for series in &panel.series {
        // No dash support on the line series, so weight stands in for style
        let width = match series.style {
            LineStyle::Solid => 2,
            LineStyle::Dashed | LineStyle::DashDot => 1,
        };
        let style = color(series.color).stroke_width(width);

        for (i, segment) in segments(timestamps, &series.values).into_iter().enumerate() {
            let drawn = chart
                .draw_series(LineSeries::new(segment, style))
                .map_err(chart_error("draw series"))?;
            if i == 0 {
                drawn
                    .label(series.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_error("draw legend"))?;

    Ok(())
}

fn format_timestamp(ts: &i64) -> String {
    DateTime::from_timestamp_millis(*ts)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn time_range(timestamps: &[i64]) -> (i64, i64) {
    let first = timestamps.first().copied().unwrap_or(0);
    let last = timestamps.last().copied().unwrap_or(first);
    if last > first {
        (first, last)
    } else {
        (first - 3_600_000, first + 3_600_000)
    }
}

fn value_range((min, max): (f64, f64)) -> (f64, f64) {
    let span = max - min;
    let margin = if span > 0.0 {
        span * 0.05
    } else {
        (max.abs() * 0.01).max(1.0)
    };
    (min - margin, max + margin)
}

/// Split a series into runs of defined points so gaps stay gaps.
fn segments(timestamps: &[i64], values: &[Option<f64>]) -> Vec<Vec<(i64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (&ts, value) in timestamps.iter().zip(values) {
        match value {
            Some(v) if v.is_finite() => current.push((ts, *v)),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// One wedge of a pie chart.
#[derive(Debug, Clone, Copy)]
pub struct PieSlice<'a> {
    pub label: &'a str,
    pub share: f64,
    pub color: Rgb,
}

/// Draw a labelled pie chart as a square PNG, percentages inside the wedges.
///
/// Slices with a non-positive share are skipped and an all-zero input leaves
/// a blank image. Without a usable font the wedges are drawn unlabelled.
pub fn draw_pie(path: &Path, size: u32, slices: &[PieSlice<'_>]) -> Result<(), ExportError> {
    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error("fill background"))?;

    let shown: Vec<&PieSlice<'_>> = slices.iter().filter(|s| s.share > 0.0).collect();
    if !shown.is_empty() {
        let center = (size as i32 / 2, size as i32 / 2);
        let radius = f64::from(size) * 0.35;
        let sizes: Vec<f64> = shown.iter().map(|s| s.share).collect();
        let colors: Vec<RGBColor> = shown.iter().map(|s| color(s.color)).collect();
        let labels: Vec<&str> = shown.iter().map(|s| s.label).collect();
        let font = f64::from(size) * 0.05;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", font).into_font().color(&BLACK));
        pie.percentages(("sans-serif", font * 0.9).into_font().color(&WHITE));

        if let Err(e) = root.draw(&pie) {
            warn!(error = %e, "Pie labels unavailable, drawing wedges only");
            root.fill(&WHITE).map_err(chart_error("fill background"))?;
            draw_wedges(&root, center, radius, &sizes, &colors)?;
        }
    }

    root.present().map_err(chart_error("write pie chart"))?;
    Ok(())
}

fn draw_wedges<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    center: (i32, i32),
    radius: f64,
    sizes: &[f64],
    colors: &[RGBColor],
) -> Result<(), ExportError> {
    let total: f64 = sizes.iter().sum();
    let mut start = -FRAC_PI_2;

    for (&value, &fill) in sizes.iter().zip(colors) {
        let sweep = value / total * TAU;
        let steps = ((sweep / TAU) * 180.0).ceil().max(2.0) as usize;

        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for step in 0..=steps {
            let angle = start + sweep * step as f64 / steps as f64;
            points.push((
                center.0 + (radius * angle.cos()).round() as i32,
                center.1 + (radius * angle.sin()).round() as i32,
            ));
        }

        root.draw(&Polygon::new(points, fill.filled()))
            .map_err(chart_error("draw slice"))?;
        start += sweep;
    }
    Ok(())
}
