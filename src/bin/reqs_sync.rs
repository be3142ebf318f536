use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use query_window::requirements::{
    DEFAULT_DESCRIPTOR_PATH, DEFAULT_EXTRA, DEFAULT_OUTPUT_PATH, SyncMode, SyncOptions,
    SyncOutcome, sync_requirements,
};
use query_window::telemetry::init_default_tracing;

/// Writes a requirements file from a packaging descriptor's extras.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    out: PathBuf,

    /// Path of the JSON packaging descriptor to process
    #[arg(short, long, default_value = DEFAULT_DESCRIPTOR_PATH)]
    setup: PathBuf,

    /// Name of extra to use
    #[arg(short, long, default_value = DEFAULT_EXTRA)]
    extra: String,

    /// Print diffs, don't write file
    #[arg(short, long)]
    diff: bool,

    /// Print new requirements, don't write file
    #[arg(short, long, conflicts_with = "diff")]
    print: bool,

    /// Leave the base install requirements out
    #[arg(long)]
    no_base: bool,
}

impl Args {
    fn into_options(self) -> SyncOptions {
        let mode = if self.print {
            SyncMode::Print
        } else if self.diff {
            SyncMode::Diff
        } else {
            SyncMode::Write
        };
        SyncOptions {
            descriptor: self.setup,
            output: self.out,
            extra: self.extra,
            include_base: !self.no_base,
            mode,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let _ = init_default_tracing("warn");
    let options = Args::parse().into_options();

    let outcome = sync_requirements(&options)?;
    match &outcome {
        SyncOutcome::Printed(requirements) => println!("{}", requirements.join("\n")),
        SyncOutcome::DiffReported(diff) => {
            for line in diff {
                println!("{}", line.trim());
            }
        }
        SyncOutcome::UpToDate | SyncOutcome::Written { .. } => {}
    }

    Ok(ExitCode::from(outcome.exit_code()))
}
