//! Backend-independent chart description.
//!
//! The engine only describes what to draw. Rendering to image files lives in
//! the export crate and the terminal dashboard draws the price panel itself.

use serde::Serialize;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BLUE: Rgb = Rgb(31, 119, 180);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const GREEN: Rgb = Rgb(44, 160, 44);
    pub const ORANGE: Rgb = Rgb(255, 127, 14);
    pub const PURPLE: Rgb = Rgb(148, 103, 189);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
}

/// One plotted line aligned to the figure's timestamp axis.
#[derive(Debug, Clone, Serialize)]
pub struct LineSeries {
    pub label: String,
    pub color: Rgb,
    pub style: LineStyle,
    pub values: Vec<Option<f64>>,
}

impl LineSeries {
    pub fn new(label: impl Into<String>, color: Rgb, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            color,
            style: LineStyle::Solid,
            values,
        }
    }

    pub fn styled(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Minimum and maximum of the defined values.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Horizontal reference line.
#[derive(Debug, Clone, Serialize)]
pub struct Guide {
    pub y: f64,
    pub color: Rgb,
}

/// A stacked chart panel sharing the figure's x axis.
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub title: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
    pub guides: Vec<Guide>,
}

impl Panel {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            guides: Vec::new(),
        }
    }

    pub fn push(&mut self, series: LineSeries) {
        self.series.push(series);
    }

    pub fn guide(&mut self, y: f64, color: Rgb) {
        self.guides.push(Guide { y, color });
    }

    /// Y range covering every series and guide.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .filter_map(LineSeries::bounds)
            .chain(self.guides.iter().map(|g| (g.y, g.y)))
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

/// A complete chart: title, shared time axis (Unix ms) and panels.
///
/// The first panel is always the price panel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub title: String,
    pub timestamps: Vec<i64>,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn price_panel(&self) -> Option<&Panel> {
        self.panels.first()
    }

    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }

    /// Labels of every series, in drawing order.
    pub fn labels(&self) -> Vec<&str> {
        self.panels
            .iter()
            .flat_map(|p| p.series.iter().map(|s| s.label.as_str()))
            .collect()
    }
}
