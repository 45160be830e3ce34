use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{AppendError, Result};
use crate::pipeline::VideoAppender;

/// An input the batch could not process
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: String,
}

/// Outcome of appending one tail video to many inputs
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when at least one input produced an output
    pub fn any_succeeded(&self) -> bool {
        !self.succeeded.is_empty()
    }
}

/// Output path for the `index`-th batch input
///
/// The index keeps outputs apart when inputs from different directories
/// share a file name.
pub fn batch_output_path(output_dir: &Path, index: usize, input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("video-{}.mp4", index));
    output_dir.join(format!("appended-{}-{}", index, file_name))
}

impl VideoAppender {
    /// Append `append_path` to every input, one pipeline run at a time
    ///
    /// A failing input is recorded and the batch moves on. Only a missing
    /// tail video or an unusable output directory fails the whole batch.
    pub async fn append_batch(
        &self,
        inputs: &[PathBuf],
        append_path: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<BatchReport> {
        let append_path = append_path.as_ref();
        let output_dir = output_dir.as_ref();

        if !append_path.is_file() {
            return Err(AppendError::missing_input(append_path));
        }
        tokio::fs::create_dir_all(output_dir).await?;

        info!("Appending {} to {} videos", append_path.display(), inputs.len());

        let mut report = BatchReport::default();
        for (index, input) in inputs.iter().enumerate() {
            let output = batch_output_path(output_dir, index, input);
            match self.append(input, append_path, &output).await {
                Ok(_) => report.succeeded.push(output),
                Err(e) => {
                    warn!("Skipping {}: {}", input.display(), e);
                    report.failed.push(BatchFailure {
                        input: input.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Batch finished: {} of {} succeeded",
            report.succeeded.len(),
            report.total()
        );
        Ok(report)
    }
}
