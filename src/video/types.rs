use serde::{Deserialize, Serialize};

/// Target encoding every source is normalized to before concatenation
///
/// Both intermediates must share codec, resolution and frame rate, otherwise
/// the stream-copy concat produces a broken timeline. The defaults describe a
/// vertical 1080x1920 clip at 30 fps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeProfile {
    /// Video encoder passed to `-c:v`
    pub video_codec: String,

    /// Audio encoder passed to `-c:a`
    pub audio_codec: String,

    /// Encoder speed preset
    pub preset: String,

    /// Constant rate factor (0-51, lower is better)
    pub crf: u8,

    /// Output frame rate
    pub fps: u32,

    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Move the moov atom in front of the media data
    pub faststart: bool,
}

impl Default for NormalizeProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "fast".to_string(),
            crf: 23,
            fps: 30,
            width: 1080,
            height: 1920,
            faststart: true,
        }
    }
}

impl NormalizeProfile {
    /// Resolution in the `WxH` form ffmpeg expects for `-s`
    pub fn size(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Encoder arguments placed between the input and the output path
    pub fn encode_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
        ];
        if self.faststart {
            args.push("-movflags".to_string());
            args.push("+faststart".to_string());
        }
        args.extend([
            "-r".to_string(),
            self.fps.to_string(),
            "-s".to_string(),
            self.size(),
        ]);
        args
    }
}

/// Stream properties reported by ffprobe
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl MediaInfo {
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Length of one frame in seconds, zero when the rate is unknown
    pub fn frame_duration(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            0.0
        }
    }
}
