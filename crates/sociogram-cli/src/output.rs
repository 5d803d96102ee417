//! Output file naming.

use std::path::{Path, PathBuf};

use sociogram_error::{Error, Result};

use crate::SociogramOptions;

fn file_name(input: &Path) -> Result<&str> {
    input.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        Error::invalid_argument("input path has no UTF-8 file name")
            .with_operation("output::file_name")
            .with_context("path", input.display().to_string())
    })
}

/// `<output-dir>/<output-prefix><input file name>`.
pub fn workbook_path(opts: &SociogramOptions, input: &Path) -> Result<PathBuf> {
    let name = file_name(input)?;
    Ok(opts.output_dir.join(format!("{}{}", opts.output_prefix, name)))
}

/// Base name of the picture for sheet `sheet`: `<image-prefix><stem>` with its
/// last character replaced by the sheet number.
///
/// `Graph_` + `group.xlsx` gives `Graph_grou1` for sheet 1.
pub fn image_base_name(image_prefix: &str, stem: &str, sheet: u32) -> String {
    let mut base = format!("{image_prefix}{stem}");
    base.pop();
    base.push_str(&sheet.to_string());
    base
}

/// `<output-dir>/<image base name>.<extension>` for one sheet.
pub fn sheet_artifact_path(
    opts: &SociogramOptions,
    input: &Path,
    sheet: u32,
    extension: &str,
) -> Result<PathBuf> {
    let name = file_name(input)?;
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let base = image_base_name(&opts.image_prefix, stem, sheet);
    Ok(opts.output_dir.join(format!("{base}.{extension}")))
}
