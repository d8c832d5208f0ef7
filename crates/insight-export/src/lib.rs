//! Exports: chart images and sentiment reports.
//!
//! - [`render_figure`] draws a signal-engine figure to SVG or PNG
//! - [`ReportExporter`] writes the sentiment spreadsheet (CSV) and the
//!   paginated HTML document with one section and pie chart per symbol

mod chart;
mod report;

pub use chart::{draw_pie, render_figure, PieSlice};
pub use report::{ExportConfig, ExportedFiles, ReportExporter};
