//! Scoped temporary files created next to the output video.

use std::path::{Path, PathBuf};

use rand::{distributions::Alphanumeric, Rng};
use tracing::{debug, warn};

use crate::error::Result;

/// File name prefixes of every intermediate the pipeline creates
pub const TEMP_PREFIXES: [&str; 4] = ["norm_input_", "norm_append_", "concat_list_", "concat_output_"];

/// Whether `file_name` looks like one of the pipeline's intermediates
pub fn is_temp_name(file_name: &str) -> bool {
    TEMP_PREFIXES.iter().any(|prefix| file_name.starts_with(prefix))
}

/// Token unique to one pipeline run: process id plus a random suffix
pub fn unique_token() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}_{}", std::process::id(), suffix)
}

/// Directory the intermediates of `output` live in
pub fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Names of the intermediates for one run
#[derive(Debug, Clone)]
pub struct TempNames {
    dir: PathBuf,
    token: String,
}

impl TempNames {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self::with_token(dir, unique_token())
    }

    pub fn with_token<P: Into<PathBuf>>(dir: P, token: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn normalized_input(&self) -> PathBuf {
        self.dir.join(format!("norm_input_{}.mp4", self.token))
    }

    pub fn normalized_append(&self) -> PathBuf {
        self.dir.join(format!("norm_append_{}.mp4", self.token))
    }

    pub fn manifest(&self) -> PathBuf {
        self.dir.join(format!("concat_list_{}.txt", self.token))
    }

    /// Concat target, carrying the final output's extension so ffmpeg
    /// picks the same muxer
    pub fn partial_output(&self, output: &Path) -> PathBuf {
        let ext = output
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .unwrap_or("mp4");
        self.dir.join(format!("concat_output_{}.{}", self.token, ext))
    }
}

/// A temporary file removed when the guard is dropped
///
/// The file does not have to exist yet; a stage that fails before creating
/// it leaves nothing to remove.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    armed: bool,
}

impl TempArtifact {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the file to `dest` and stop tracking it
    pub fn persist(mut self, dest: &Path) -> Result<()> {
        std::fs::rename(&self.path, dest)?;
        self.armed = false;
        Ok(())
    }

    fn cleanup(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temporary file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove temporary file {}: {}", self.path.display(), e),
        }
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        self.cleanup();
    }
}
