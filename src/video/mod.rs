//! # Video Module
//!
//! FFmpeg-backed stages of the append pipeline: normalization, concat,
//! probing, and the temporary files they leave behind.

pub mod concat;
pub mod ffmpeg;
pub mod normalizer;
pub mod probe;
pub mod temp;
pub mod types;

pub use concat::Concatenator;
pub use ffmpeg::{ToolOutput, ToolRunner};
pub use normalizer::Normalizer;
pub use probe::Prober;
pub use temp::{TempArtifact, TempNames};
pub use types::{MediaInfo, NormalizeProfile};
