use std::path::Path;

use thiserror::Error;

/// Main error type for the video appender library
#[derive(Error, Debug)]
pub enum AppendError {
    #[error("Input video not found: {path}")]
    MissingInput { path: String },

    #[error("Normalization failed for {source_path}: {stderr}")]
    Normalization { source_path: String, stderr: String },

    #[error("Concat failed: {stderr}")]
    Concat { stderr: String },

    #[error("{program} not found. Please install FFmpeg or set [tools] in the config file.")]
    ToolNotFound { program: String },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    #[error("Probe failed for {path}: {reason}")]
    Probe { path: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using AppendError
pub type Result<T> = std::result::Result<T, AppendError>;

impl AppendError {
    pub fn missing_input(path: &Path) -> Self {
        Self::MissingInput {
            path: path.display().to_string(),
        }
    }

    /// Map a spawn failure, singling out a missing executable
    pub fn spawn(program: &Path, source: std::io::Error) -> Self {
        let program = program.display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::ToolNotFound { program }
        } else {
            Self::Spawn { program, source }
        }
    }
}
