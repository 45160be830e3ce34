use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    video::NormalizeProfile,
};

/// Main configuration for the video appender
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target encoding for the normalization stages
    pub profile: NormalizeProfile,

    /// Locations of the external tools
    pub tools: ToolsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_profile(&self.profile)?;
        self.tools.validate()?;
        Ok(())
    }
}

fn validate_profile(profile: &NormalizeProfile) -> Result<()> {
    for (key, value) in [
        ("profile.video_codec", &profile.video_codec),
        ("profile.audio_codec", &profile.audio_codec),
        ("profile.preset", &profile.preset),
    ] {
        if value.trim().is_empty() {
            return Err(invalid(key, value));
        }
    }

    if profile.crf > 51 {
        return Err(invalid("profile.crf", profile.crf));
    }

    if profile.fps == 0 {
        return Err(invalid("profile.fps", profile.fps));
    }

    // yuv420p output needs even dimensions
    if profile.width == 0 || profile.width % 2 != 0 {
        return Err(invalid("profile.width", profile.width));
    }
    if profile.height == 0 || profile.height % 2 != 0 {
        return Err(invalid("profile.height", profile.height));
    }

    Ok(())
}

/// External tool locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// ffmpeg executable, looked up on PATH when not absolute
    pub ffmpeg: PathBuf,

    /// ffprobe executable, looked up on PATH when not absolute
    pub ffprobe: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl ToolsConfig {
    fn validate(&self) -> Result<()> {
        if self.ffmpeg.as_os_str().is_empty() {
            return Err(invalid("tools.ffmpeg", ""));
        }
        if self.ffprobe.as_os_str().is_empty() {
            return Err(invalid("tools.ffprobe", ""));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> crate::error::AppendError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}
