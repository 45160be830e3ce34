use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    config::Config,
    error::{AppendError, Result},
    video::{
        temp::output_dir, Concatenator, MediaInfo, Normalizer, Prober, TempArtifact, TempNames,
        ToolRunner,
    },
};

/// Timings and location of a finished append
#[derive(Debug, Clone)]
pub struct AppendReport {
    pub output: PathBuf,
    pub normalize_input: Duration,
    pub normalize_append: Duration,
    pub concat: Duration,
}

impl AppendReport {
    pub fn total(&self) -> Duration {
        self.normalize_input + self.normalize_append + self.concat
    }
}

/// Appends one video to another
///
/// The pipeline is strictly sequential:
/// 1. Normalize the input video to the configured profile
/// 2. Normalize the appended video to the same profile
/// 3. Stream-copy both through the concat demuxer
///
/// Intermediates are created next to the output and removed on every exit
/// path. The output path is only written once the concat succeeded.
pub struct VideoAppender {
    config: Config,
    normalizer: Normalizer,
    concatenator: Concatenator,
    prober: Prober,
}

impl VideoAppender {
    pub fn new(config: Config) -> Self {
        let ffmpeg = ToolRunner::new(config.tools.ffmpeg.clone());
        let ffprobe = ToolRunner::new(config.tools.ffprobe.clone());
        Self {
            normalizer: Normalizer::new(ffmpeg.clone(), config.profile.clone()),
            concatenator: Concatenator::new(ffmpeg),
            prober: Prober::new(ffprobe),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append `append_path` to the end of `input_path`, writing `output_path`
    pub async fn append(
        &self,
        input_path: impl AsRef<Path>,
        append_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<AppendReport> {
        let input_path = input_path.as_ref();
        let append_path = append_path.as_ref();
        let output_path = output_path.as_ref();

        ensure_source(input_path)?;
        ensure_source(append_path)?;

        let names = TempNames::new(output_dir(output_path));
        info!("Appending {} to {}", append_path.display(), input_path.display());
        debug!("Temporary token: {}", names.token());

        let norm_input = TempArtifact::new(names.normalized_input());
        let norm_append = TempArtifact::new(names.normalized_append());

        // Step 1 and 2: bring both sources to one profile
        let started = Instant::now();
        self.normalizer
            .normalize(input_path, norm_input.path())
            .await?;
        let normalize_input = started.elapsed();

        let started = Instant::now();
        self.normalizer
            .normalize(append_path, norm_append.path())
            .await?;
        let normalize_append = started.elapsed();

        // Step 3: join without re-encoding
        let started = Instant::now();
        let partial = TempArtifact::new(names.partial_output(output_path));
        let segments = [norm_input.path().to_path_buf(), norm_append.path().to_path_buf()];
        {
            let manifest = TempArtifact::new(names.manifest());
            self.concatenator
                .write_manifest(&segments, manifest.path())?;
            let result = self
                .concatenator
                .concat(manifest.path(), partial.path())
                .await;
            drop(manifest);
            result?;
        }
        partial.persist(output_path)?;
        let concat = started.elapsed();

        info!("Output saved to {}", output_path.display());
        Ok(AppendReport {
            output: output_path.to_path_buf(),
            normalize_input,
            normalize_append,
            concat,
        })
    }

    /// Read duration, resolution and frame rate of `path`
    pub async fn probe(&self, path: impl AsRef<Path>) -> Result<MediaInfo> {
        self.prober.probe(path.as_ref()).await
    }
}

impl Default for VideoAppender {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn ensure_source(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(AppendError::missing_input(path));
    }
    Ok(())
}
