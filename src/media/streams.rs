//! Stream-copy demuxing and muxing through `ffmpeg`.

use super::command::ToolCommand;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extensions that tell `ffmpeg` how to treat the raw elementary streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFormats {
    /// Raw video stream extension.
    ///
    /// Default: `h264`.
    pub video: String,
    /// Raw audio stream extension.
    ///
    /// Default: `aac`.
    pub audio: String,
}

impl Default for StreamFormats {
    fn default() -> Self {
        Self {
            video: "h264".to_string(),
            audio: "aac".to_string(),
        }
    }
}

/// Resolve the `ffmpeg` executable.
///
/// An override is used when it exists on disk; otherwise `PATH` is searched.
pub fn locate_ffmpeg(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = override_path {
        if p.exists() {
            return Ok(p.to_path_buf());
        }
        debug!(path = %p.display(), "ffmpeg override not found, searching PATH");
    }
    which::which("ffmpeg").map_err(|e| Error::ToolNotFound(format!("ffmpeg: {e}")))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Split `input` into a video-only stream and an audio-only stream.
///
/// Both streams are copied without re-encoding.
pub fn extract_streams(
    ffmpeg: &Path,
    input: &Path,
    video_out: &Path,
    audio_out: &Path,
) -> Result<()> {
    ToolCommand::new(ffmpeg.to_path_buf())
        .args(["-y", "-i"])
        .arg(path_arg(input))
        .args(["-c:v", "copy", "-an"])
        .arg(path_arg(video_out))
        .execute()?;

    ToolCommand::new(ffmpeg.to_path_buf())
        .args(["-y", "-i"])
        .arg(path_arg(input))
        .args(["-c:a", "copy", "-vn"])
        .arg(path_arg(audio_out))
        .execute()?;

    info!(
        video = %video_out.display(),
        audio = %audio_out.display(),
        "extracted streams"
    );
    Ok(())
}

/// Mux raw video and audio stream bytes into the container at `output`.
///
/// The streams are staged in a temporary directory that is removed when
/// this returns, whether or not `ffmpeg` succeeds.
pub fn combine_streams(
    ffmpeg: &Path,
    formats: &StreamFormats,
    video: &[u8],
    audio: &[u8],
    output: &Path,
) -> Result<()> {
    let staging = tempfile::Builder::new().prefix("pixelframe-").tempdir()?;
    let temp_video = staging
        .path()
        .join(format!("temp_video_stream.{}", formats.video));
    let temp_audio = staging
        .path()
        .join(format!("temp_audio_stream.{}", formats.audio));

    std::fs::write(&temp_video, video)?;
    std::fs::write(&temp_audio, audio)?;

    ToolCommand::new(ffmpeg.to_path_buf())
        .args(["-y", "-i"])
        .arg(path_arg(&temp_video))
        .arg("-i")
        .arg(path_arg(&temp_audio))
        .args(["-c", "copy"])
        .arg(path_arg(output))
        .execute()?;

    info!(output = %output.display(), "combined streams");
    Ok(())
}
