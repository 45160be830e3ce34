use std::ffi::OsString;
use std::path::Path;

use tracing::info;

use crate::error::{AppendError, Result};
use crate::video::ffmpeg::ToolRunner;
use crate::video::types::NormalizeProfile;

/// Re-encodes sources to a shared [`NormalizeProfile`]
pub struct Normalizer {
    runner: ToolRunner,
    profile: NormalizeProfile,
}

impl Normalizer {
    pub fn new(runner: ToolRunner, profile: NormalizeProfile) -> Self {
        Self { runner, profile }
    }

    /// Full ffmpeg argument list for one normalization, overwriting `dest`
    pub fn build_args(&self, source: &Path, dest: &Path) -> Vec<OsString> {
        let mut args = vec![OsString::from("-i"), source.as_os_str().to_owned()];
        args.extend(self.profile.encode_args().into_iter().map(OsString::from));
        args.push(OsString::from("-y"));
        args.push(dest.as_os_str().to_owned());
        args
    }

    pub async fn normalize(&self, source: &Path, dest: &Path) -> Result<()> {
        info!(
            "Normalizing {} to {} @ {} fps",
            source.display(),
            self.profile.size(),
            self.profile.fps
        );

        let output = self.runner.run(&self.build_args(source, dest)).await?;
        if !output.success {
            return Err(AppendError::Normalization {
                source_path: source.display().to_string(),
                stderr: output.stderr,
            });
        }
        Ok(())
    }
}
