//! Per-file pipeline: load sheets → analyze → render → assemble report → publish.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, info_span};

use sociogram_core::{SheetAnalysis, analyze_sheet};
use sociogram_error::{Error, Result};
use sociogram_render::{DotRenderer, GraphRenderer, PngRenderer};
use sociogram_workbook::{ReportBuilder, ReportSheet, load_sheet, publish_atomically};

use crate::SociogramOptions;
use crate::output::{sheet_artifact_path, workbook_path};

/// What was written for one input workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub workbook: PathBuf,
    /// Pictures and DOT files, in sheet order.
    pub artifacts: Vec<PathBuf>,
    pub sheets: usize,
}

/// Process every configured sheet of `input` and publish the report workbook.
///
/// Any sheet failure aborts the file before the workbook is published.
/// Pictures of sheets processed before the failure remain on disk.
pub fn process_file(opts: &SociogramOptions, input: &Path) -> Result<FileReport> {
    let _span = info_span!("process_file", file = %input.display()).entered();
    let file_start = Instant::now();

    let report = build_report(opts, input)
        .map_err(|e| e.with_context("file", input.display().to_string()))?;

    info!(
        sheets = report.sheets,
        workbook = %report.workbook.display(),
        "File processed: {:.2}s",
        file_start.elapsed().as_secs_f64()
    );
    Ok(report)
}

fn build_report(opts: &SociogramOptions, input: &Path) -> Result<FileReport> {
    let target = workbook_path(opts, input)?;
    let png = PngRenderer::default();
    let dot = DotRenderer::default();

    let mut report = ReportBuilder::new();
    let mut artifacts = Vec::new();

    for n in 1..=opts.sheets {
        let sheet_start = Instant::now();
        let source_name = format!("{}{}", opts.source_prefix, n);
        let statistics_name = format!("{}{}", opts.stats_prefix, n);

        let source = load_sheet(input, &source_name)?;
        let analysis = analyze_sheet(&source_name, source.matrix)?;

        let image = render(&png, &analysis)?;
        artifacts.push(write_artifact(
            &sheet_artifact_path(opts, input, n, png.extension())?,
            &image,
        )?);
        if opts.emit_dot {
            let text = render(&dot, &analysis)?;
            artifacts.push(write_artifact(
                &sheet_artifact_path(opts, input, n, dot.extension())?,
                &text,
            )?);
        }

        report.add_sheet(&ReportSheet {
            source_name: &source_name,
            statistics_name: &statistics_name,
            corner_label: source.corner_label.as_deref(),
            matrix: &analysis.matrix,
            statistics: &analysis.statistics,
            image_png: Some(&image),
        })?;

        info!(
            "Sheet {}: {:.3}s",
            source_name,
            sheet_start.elapsed().as_secs_f64()
        );
    }

    let publish_start = Instant::now();
    let bytes = report.finish()?;
    publish_atomically(&bytes, &target)?;
    info!(
        "Report publish: {:.3}s ({} bytes)",
        publish_start.elapsed().as_secs_f64(),
        bytes.len()
    );

    Ok(FileReport {
        input: input.to_path_buf(),
        workbook: target,
        artifacts,
        sheets: opts.sheets as usize,
    })
}

fn render<R: GraphRenderer>(renderer: &R, analysis: &SheetAnalysis) -> Result<Vec<u8>> {
    renderer
        .render(&analysis.graph, &analysis.layout)
        .map_err(|e| e.with_context("sheet", analysis.label.clone()))
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::write(path, bytes).map_err(|e| {
        Error::from(e)
            .with_operation("pipeline::write_artifact")
            .with_context("path", path.display().to_string())
    })?;
    Ok(path.to_path_buf())
}
