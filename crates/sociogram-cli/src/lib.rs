//! sociogram command-line interface.
//!
pub mod discovery;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;
use std::time::Instant;

use sociogram_error::{Error, Result};
use tracing::{error, info, warn};

pub use options::{InputOptions, OutputOptions};
pub use pipeline::{FileReport, process_file};

/// Options for running sociogram.
#[derive(Debug, Clone)]
pub struct SociogramOptions {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extension: String,
    pub sheets: u32,
    pub source_prefix: String,
    pub stats_prefix: String,
    pub output_prefix: String,
    pub image_prefix: String,
    pub emit_dot: bool,
    pub keep_going: bool,
}

impl Default for SociogramOptions {
    fn default() -> Self {
        Self::from_args(InputOptions::default(), OutputOptions::default(), false)
    }
}

impl SociogramOptions {
    pub fn from_args(input: InputOptions, output: OutputOptions, keep_going: bool) -> Self {
        Self {
            data_dir: input.data_dir,
            output_dir: output.output_dir,
            extension: input.extension,
            sheets: input.sheets,
            source_prefix: input.source_prefix,
            stats_prefix: output.stats_prefix,
            output_prefix: output.output_prefix,
            image_prefix: output.image_prefix,
            emit_dot: output.emit_dot,
            keep_going,
        }
    }

    pub fn with_dirs(mut self, data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_sheets(mut self, sheets: u32) -> Self {
        self.sheets = sheets;
        self
    }

    pub fn with_emit_dot(mut self, emit_dot: bool) -> Self {
        self.emit_dot = emit_dot;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.sheets == 0 {
            return Err(Error::config_invalid("sheet count must be at least 1")
                .with_operation("SociogramOptions::validate"));
        }
        if self.extension.is_empty() {
            return Err(Error::config_invalid("input extension must not be empty")
                .with_operation("SociogramOptions::validate"));
        }
        Ok(())
    }
}

/// Outcome of one run over the data directory.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: Vec<FileReport>,
    pub failed: Vec<(PathBuf, Error)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Main entry point
///
/// The output directory is created first, even when there is nothing to
/// process. Configuration problems, an unreadable data directory, or an
/// output directory that cannot be created are returned as errors. Failures of
/// individual files are collected in the summary.
pub fn run_main(opts: &SociogramOptions) -> Result<RunSummary> {
    opts.validate()?;
    let run_start = Instant::now();

    discovery::ensure_output_dir(&opts.output_dir)?;
    let files = discovery::discover_files(opts)?;
    let mut summary = RunSummary::default();
    if files.is_empty() {
        warn!(dir = %opts.data_dir.display(), "no input workbooks found");
        return Ok(summary);
    }

    for file in files {
        match process_file(opts, &file) {
            Ok(report) => summary.processed.push(report),
            Err(e) => {
                error!(file = %file.display(), error = %e, "file failed");
                summary.failed.push((file, e));
                if !opts.keep_going {
                    break;
                }
            }
        }
    }

    info!(
        processed = summary.processed.len(),
        failed = summary.failed.len(),
        "Run: {:.2}s",
        run_start.elapsed().as_secs_f64()
    );
    Ok(summary)
}
