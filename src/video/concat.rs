use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppendError, Result};
use crate::video::ffmpeg::ToolRunner;

#[cfg(unix)]
fn path_bytes(path: &Path) -> Result<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes())
}

// The manifest is read as UTF-8 off unix
#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Result<&[u8]> {
    path.to_str()
        .map(str::as_bytes)
        .ok_or_else(|| AppendError::NonUtf8Path {
            path: path.display().to_string(),
        })
}

/// Quote a path for a concat demuxer `file` directive
///
/// Inside single quotes the demuxer only treats `'` specially, so each one
/// closes the quote, emits an escaped quote and reopens. Works on raw bytes
/// so paths that are not UTF-8 survive unchanged.
pub fn quote_path(path: &Path) -> Result<Vec<u8>> {
    let bytes = path_bytes(path)?;
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'\'');
    for &b in bytes {
        if b == b'\'' {
            quoted.extend_from_slice(b"'\\''");
        } else {
            quoted.push(b);
        }
    }
    quoted.push(b'\'');
    Ok(quoted)
}

/// Build a concat demuxer manifest with one absolute `file` line per segment
pub fn build_manifest(segments: &[PathBuf]) -> Result<Vec<u8>> {
    let mut manifest = Vec::new();
    for segment in segments {
        let absolute = std::path::absolute(segment)?;
        manifest.extend_from_slice(b"file ");
        manifest.extend_from_slice(&quote_path(&absolute)?);
        manifest.push(b'\n');
    }
    Ok(manifest)
}

/// Joins already-normalized segments without re-encoding
pub struct Concatenator {
    runner: ToolRunner,
}

impl Concatenator {
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }

    pub fn build_args(manifest_path: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-f", "concat", "-safe", "0", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        // manifest holds absolute paths, hence -safe 0 above
        args.push(manifest_path.as_os_str().to_owned());
        args.extend(["-c", "copy", "-y"].into_iter().map(OsString::from));
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Write the manifest for `segments` to `manifest_path`
    pub fn write_manifest(&self, segments: &[PathBuf], manifest_path: &Path) -> Result<()> {
        let manifest = build_manifest(segments)?;
        debug!(
            "Concat manifest {}:\n{}",
            manifest_path.display(),
            String::from_utf8_lossy(&manifest)
        );
        std::fs::write(manifest_path, manifest)?;
        Ok(())
    }

    /// Stream-copy the segments listed in `manifest_path` into `output`
    pub async fn concat(&self, manifest_path: &Path, output: &Path) -> Result<()> {
        info!("Concatenating into {}", output.display());

        let result = self
            .runner
            .run(&Self::build_args(manifest_path, output))
            .await?;
        if !result.success {
            return Err(AppendError::Concat {
                stderr: result.stderr,
            });
        }
        Ok(())
    }
}
