use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sociogram::{InputOptions, OutputOptions, SociogramOptions, run_main};

#[derive(Parser, Debug)]
#[command(
    name = "sociogram",
    about = "sociogram: influence statistics and tier diagrams for adjacency-matrix workbooks",
    version
)]
pub struct Cli {
    #[command(flatten)]
    input: InputOptions,

    #[command(flatten)]
    output: OutputOptions,

    /// Continue with the next workbook after one fails
    #[arg(long = "keep-going", default_value_t = false)]
    keep_going: bool,
}

pub fn run(args: Cli) -> ExitCode {
    let total_start = Instant::now();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let opts = SociogramOptions::from_args(args.input, args.output, args.keep_going);

    let code = match run_main(&opts) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            for (file, e) in &summary.failed {
                eprintln!("Error: {}: {e}", file.display());
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
            ExitCode::FAILURE
        }
    };

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    code
}

pub fn main() -> ExitCode {
    let args = Cli::parse();
    run(args)
}
