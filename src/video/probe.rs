use std::ffi::OsString;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppendError, Result};
use crate::video::ffmpeg::ToolRunner;
use crate::video::types::MediaInfo;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Parse an ffprobe rational such as `30000/1001`
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (num, den) = match rate.split_once('/') {
        Some((num, den)) => (num.trim().parse::<f64>().ok()?, den.trim().parse::<f64>().ok()?),
        None => (rate.trim().parse::<f64>().ok()?, 1.0),
    };
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

fn parse_probe_json(json: &str) -> std::result::Result<MediaInfo, String> {
    let output: ProbeOutput = serde_json::from_str(json).map_err(|e| e.to_string())?;
    let stream = output
        .streams
        .first()
        .ok_or_else(|| "no video stream".to_string())?;

    let width = stream.width.ok_or_else(|| "missing width".to_string())?;
    let height = stream.height.ok_or_else(|| "missing height".to_string())?;
    let fps = stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .ok_or_else(|| "missing frame rate".to_string())?;

    let duration = output
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(stream.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| "missing duration".to_string())?;

    Ok(MediaInfo {
        duration,
        width,
        height,
        fps,
    })
}

/// Reads stream properties of media files through ffprobe
pub struct Prober {
    runner: ToolRunner,
}

impl Prober {
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }

    pub async fn probe(&self, path: &Path) -> Result<MediaInfo> {
        let args: Vec<OsString> = [
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "-select_streams",
            "v:0",
        ]
        .into_iter()
        .map(OsString::from)
        .chain(std::iter::once(path.as_os_str().to_owned()))
        .collect();

        let output = self.runner.run(&args).await?;
        if !output.success {
            return Err(AppendError::Probe {
                path: path.display().to_string(),
                reason: output.stderr,
            });
        }

        let info = parse_probe_json(&output.stdout).map_err(|reason| AppendError::Probe {
            path: path.display().to_string(),
            reason,
        })?;
        debug!(
            "{}: {}x{} @ {:.2} fps, {:.2}s",
            path.display(),
            info.width,
            info.height,
            info.fps,
            info.duration
        );
        Ok(info)
    }
}
