//! Append one tail video to every input, continuing past failures.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use video_appender::{BatchReport, Config, VideoAppender};

#[derive(Parser)]
#[command(
    name = "append-batch",
    version,
    about = "Append the same video to the end of many videos"
)]
struct Cli {
    /// Videos to extend
    #[arg(required = true, value_name = "inputs")]
    inputs: Vec<PathBuf>,

    /// Video appended to every input
    #[arg(short, long)]
    append: PathBuf,

    /// Directory receiving the joined videos
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    video_appender::logging::init(cli.verbose);

    match run(cli).await {
        Ok(report) => {
            print_summary(&report);
            if report.any_succeeded() {
                ExitCode::SUCCESS
            } else {
                eprintln!("Error: no videos were processed successfully");
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<BatchReport> {
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => Config::default(),
    };

    let appender = VideoAppender::new(config);
    let report = appender
        .append_batch(&cli.inputs, &cli.append, &cli.output_dir)
        .await?;
    Ok(report)
}

fn print_summary(report: &BatchReport) {
    for output in &report.succeeded {
        eprintln!("ok     {}", output.display());
    }
    for failure in &report.failed {
        eprintln!("failed {}: {}", failure.input.display(), failure.error);
    }
    eprintln!(
        "{} of {} videos processed",
        report.succeeded.len(),
        report.total()
    );
}
