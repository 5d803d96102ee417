//! Input workbook discovery.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use tracing::info;

use sociogram_error::{Error, Result};

use crate::SociogramOptions;

/// List the input workbooks directly inside `opts.data_dir`, sorted by path.
///
/// Ignore files and hidden-file rules are not applied: every regular file
/// with the configured extension counts.
pub fn discover_files(opts: &SociogramOptions) -> Result<Vec<PathBuf>> {
    let discovery_start = Instant::now();
    let dir = &opts.data_dir;

    if !dir.is_dir() {
        return Err(Error::file_not_found(dir.display().to_string())
            .with_operation("discovery::discover_files"));
    }

    let mut files = Vec::new();
    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(1));

    for entry in builder.build() {
        let entry = entry.map_err(|e| {
            Error::from(io::Error::other(format!(
                "failed to walk directory {}: {e}",
                dir.display()
            )))
            .with_operation("discovery::discover_files")
        })?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == opts.extension);
        if matches {
            files.push(path.to_path_buf());
        }
    }
    files.sort();

    info!(
        "File discovery: {:.2}s ({} files)",
        discovery_start.elapsed().as_secs_f64(),
        files.len()
    );
    Ok(files)
}

/// Create the output directory (and parents) when it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::from(e)
            .with_operation("discovery::ensure_output_dir")
            .with_context("dir", dir.display().to_string())
    })
}
