use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use video_appender::{Config, VideoAppender};

#[derive(Parser)]
#[command(
    name = "append-video",
    version,
    about = "Append one video to the end of another",
    long_about = "Normalizes both videos to a shared H.264/AAC profile (1080x1920 @ 30 fps by default) and joins them with FFmpeg's concat demuxer without re-encoding."
)]
struct Cli {
    /// Video that plays first
    #[arg(value_name = "input_video")]
    input: PathBuf,

    /// Video appended to the end
    #[arg(value_name = "append_video")]
    append: PathBuf,

    /// Where the joined video is written
    #[arg(value_name = "output_video")]
    output: PathBuf,

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
            // --help and --version
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
        Ok(()) => {
            eprintln!("Success");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => Config::default(),
    };

    let appender = VideoAppender::new(config);
    let profile = &appender.config().profile;
    info!("Target profile: {} @ {} fps, {}", profile.size(), profile.fps, profile.video_codec);

    let report = appender.append(&cli.input, &cli.append, &cli.output).await?;

    info!(
        "Done in {:.1}s (normalize {:.1}s + {:.1}s, concat {:.1}s)",
        report.total().as_secs_f64(),
        report.normalize_input.as_secs_f64(),
        report.normalize_append.as_secs_f64(),
        report.concat.as_secs_f64()
    );
    Ok(())
}
