//! Analyze command implementation.

use anyhow::{Context, Result};
use insight_config::load_config;
use insight_export::{render_figure, ExportConfig, ReportExporter};
use insight_core::types::Asset;
use insight_session::SessionReport;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::commands::{build_session, session_request};
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let (asset, request) = session_request(&args.selection)?;
    info!(%asset, indicators = %request.indicators, "Starting analysis");

    let session = build_session(&config, args.data.as_deref(), request.include_sentiment)?;
    let report = session.run(&request).await;

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(path) = &args.chart {
        write_chart(&report, path, &config.export)?;
    }

    if let Some(dir) = &args.export {
        write_reports(&report, asset, dir, &config.export)?;
    }

    Ok(())
}

fn write_chart(report: &SessionReport, path: &Path, export: &ExportConfig) -> Result<()> {
    let Some(analysis) = report.technical.ready() else {
        warn!("No technical analysis to chart");
        return Ok(());
    };

    render_figure(
        &analysis.figure,
        path,
        (export.chart_width, export.chart_height),
    )
    .with_context(|| format!("Failed to render chart to {}", path.display()))?;

    println!("Chart written to {}", path.display());
    Ok(())
}

/// Write the technical chart, spreadsheet and document into `dir`.
fn write_reports(
    report: &SessionReport,
    asset: Asset,
    dir: &Path,
    export: &ExportConfig,
) -> Result<()> {
    let exporter = ReportExporter::new(ExportConfig {
        output_dir: dir.to_path_buf(),
        ..export.clone()
    });

    if report.technical.is_ready() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        write_chart(report, &exporter.chart_path(asset, "svg"), exporter.config())?;
    }

    let Some(data) = report.sentiment.ready() else {
        warn!("No sentiment data to export");
        return Ok(());
    };

    let files = exporter
        .export_all(data)
        .with_context(|| format!("Failed to export reports to {}", dir.display()))?;

    println!("Spreadsheet written to {}", files.spreadsheet.display());
    println!("Document written to {}", files.document.display());
    Ok(())
}
