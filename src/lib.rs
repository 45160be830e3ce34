//! # Video Appender
//!
//! Append one video to the end of another. Both sources are re-encoded to a
//! shared profile with FFmpeg and then joined with the concat demuxer in
//! stream-copy mode, so the result plays as one consistent timeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use video_appender::{Config, VideoAppender};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let appender = VideoAppender::new(Config::default());
//! appender.append("clip.mp4", "outro.mp4", "final.mp4").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`pipeline`] - The append pipeline and its batch variant
//! - [`video`] - FFmpeg stages, probing and temporary files
//! - [`config`] - Target profile and tool locations
//! - [`error`] - Error types
//!
//! The default profile is H.264/AAC, 1080x1920 at 30 fps. Callers that need
//! a different geometry set it through [`Config::profile`].

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{AppendError, ConfigError, Result},
    pipeline::{AppendReport, BatchReport, VideoAppender},
    video::{MediaInfo, NormalizeProfile},
};
