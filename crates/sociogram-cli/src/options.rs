//! Command-line option groups.
//!
//! The defaults reproduce the fixed folder and worksheet names the tool has
//! always used, so a bare `sociogram` invocation needs no flags.

use std::path::PathBuf;

use clap::Args;

/// Where input workbooks come from and how their sheets are named.
#[derive(Args, Debug, Clone)]
pub struct InputOptions {
    /// Directory holding the input workbooks (not scanned recursively).
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Extension of input workbooks, without the dot.
    #[arg(long, value_name = "EXT", default_value = "xlsx")]
    pub extension: String,

    /// Number of worksheets per workbook, read as `<source-prefix>1..=N`.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 6,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub sheets: u32,

    /// Name prefix of the worksheets holding the matrices.
    #[arg(long = "source-prefix", value_name = "PREFIX", default_value = "Лист")]
    pub source_prefix: String,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            extension: "xlsx".to_string(),
            sheets: 6,
            source_prefix: "Лист".to_string(),
        }
    }
}

/// Where results go and how they are named.
#[derive(Args, Debug, Clone)]
pub struct OutputOptions {
    /// Directory for report workbooks and pictures, created when missing.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Name prefix of the statistics worksheets.
    #[arg(long = "stats-prefix", value_name = "PREFIX", default_value = "Статистика")]
    pub stats_prefix: String,

    /// File name prefix of report workbooks.
    #[arg(long = "output-prefix", value_name = "PREFIX", default_value = "Выходные данные_")]
    pub output_prefix: String,

    /// File name prefix of pictures.
    #[arg(long = "image-prefix", value_name = "PREFIX", default_value = "Graph_")]
    pub image_prefix: String,

    /// Also write a Graphviz DOT file next to every picture.
    #[arg(long = "emit-dot", default_value_t = false)]
    pub emit_dot: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            stats_prefix: "Статистика".to_string(),
            output_prefix: "Выходные данные_".to_string(),
            image_prefix: "Graph_".to_string(),
            emit_dot: false,
        }
    }
}
