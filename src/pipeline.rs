//! Video → images → video round trip.
//!
//! Splits a container into its video and audio streams, stores each stream as
//! an image, recovers both streams from those images, checks them against the
//! originals, and muxes the recovered streams into a new container.

use crate::decoder::ImageDecoder;
use crate::encoder::{EncoderConfiguration, ImageEncoder};
use crate::error::{Error, Result};
use crate::image_io::{load_image, save_image, LosslessFormat};
use crate::media::streams::StreamFormats;
use crate::media::{combine_streams, extract_streams, locate_ffmpeg};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration for the round-trip pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfiguration {
    /// Explicit `ffmpeg` executable; `PATH` is searched when unset.
    pub ffmpeg_path: Option<PathBuf>,
    /// Format the stream images are stored in.
    ///
    /// Default: PNG.
    pub image_format: LosslessFormat,
    /// Reject streams larger than this many bytes before encoding.
    ///
    /// Default: no limit (the 4-byte length field still applies).
    pub max_payload_size: Option<usize>,
    /// Extensions of the raw elementary streams.
    pub stream_formats: StreamFormats,
    /// Encoder settings shared by both streams.
    pub encoder: EncoderConfiguration,
}

/// Outcome of comparing an original stream with its recovered copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReport {
    pub name: String,
    pub original_len: usize,
    pub restored_len: usize,
    pub matches: bool,
}

impl fmt::Display for StreamReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: original {} bytes, restored {} bytes, {}",
            self.name,
            self.original_len,
            self.restored_len,
            if self.matches { "exact match" } else { "MISMATCH" }
        )
    }
}

/// Compare an original payload with the payload recovered from its image.
pub fn compare(name: &str, original: &[u8], restored: &[u8]) -> StreamReport {
    let report = StreamReport {
        name: name.to_string(),
        original_len: original.len(),
        restored_len: restored.len(),
        matches: original == restored,
    };
    if report.matches {
        info!(%report, "stream restored");
    } else {
        warn!(%report, "stream differs after restore");
    }
    report
}

/// Result of a full round trip.
#[derive(Debug, Clone)]
pub struct RoundTripReport {
    pub video: StreamReport,
    pub audio: StreamReport,
    /// The remuxed container, if one was written.
    pub output: Option<PathBuf>,
}

impl RoundTripReport {
    pub fn is_lossless(&self) -> bool {
        self.video.matches && self.audio.matches
    }
}

/// Paths of every intermediate artifact, all under one working directory.
#[derive(Debug, Clone)]
pub struct WorkPaths {
    pub video_stream: PathBuf,
    pub audio_stream: PathBuf,
    pub video_image: PathBuf,
    pub audio_image: PathBuf,
    pub restored_video_stream: PathBuf,
    pub restored_audio_stream: PathBuf,
}

impl WorkPaths {
    pub fn new(work_dir: &Path, formats: &StreamFormats, image_format: LosslessFormat) -> Self {
        let ext = image_format.extension();
        Self {
            video_stream: work_dir.join(format!("video_stream.{}", formats.video)),
            audio_stream: work_dir.join(format!("audio_stream.{}", formats.audio)),
            video_image: work_dir.join(format!("video_compressed.{ext}")),
            audio_image: work_dir.join(format!("audio_compressed.{ext}")),
            restored_video_stream: work_dir.join(format!("restored_video_stream.{}", formats.video)),
            restored_audio_stream: work_dir.join(format!("restored_audio_stream.{}", formats.audio)),
        }
    }
}

/// Drives the round trip for one input container.
#[derive(Debug, Clone, Default)]
pub struct RoundTrip {
    config: PipelineConfiguration,
}

impl RoundTrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pipeline configuration.
    pub fn with_configuration(mut self, config: PipelineConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn configuration(&self) -> &PipelineConfiguration {
        &self.config
    }

    fn check_size(&self, payload: &[u8]) -> Result<()> {
        match self.config.max_payload_size {
            Some(limit) if payload.len() > limit => Err(Error::PayloadTooLarge {
                size: payload.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Store `payload` as an image at `image_path`, then read it back.
    ///
    /// Returns the payload recovered from the stored image.
    pub fn store_and_restore(&self, payload: &[u8], image_path: &Path) -> Result<Vec<u8>> {
        self.check_size(payload)?;

        let encoder = ImageEncoder::new().with_configuration(self.config.encoder.clone());
        let image = encoder.encode(payload)?;
        save_image(image_path, &image, self.config.image_format)?;
        info!(
            image = %image_path.display(),
            bytes = payload.len(),
            width = image.width(),
            height = image.height(),
            "stored payload as image"
        );

        let stored = load_image(image_path)?;
        let restored = ImageDecoder::new().decode(&stored)?;
        info!(
            image = %image_path.display(),
            bytes = restored.len(),
            "restored payload from image"
        );
        Ok(restored)
    }

    /// Run every step on `input`, keeping intermediates in `work_dir`.
    ///
    /// When `output` is given, the restored streams are muxed into it.
    pub fn run(&self, input: &Path, work_dir: &Path, output: Option<&Path>) -> Result<RoundTripReport> {
        let ffmpeg = locate_ffmpeg(self.config.ffmpeg_path.as_deref())?;
        std::fs::create_dir_all(work_dir)?;
        let paths = WorkPaths::new(work_dir, &self.config.stream_formats, self.config.image_format);

        extract_streams(&ffmpeg, input, &paths.video_stream, &paths.audio_stream)?;

        let video = std::fs::read(&paths.video_stream)?;
        let audio = std::fs::read(&paths.audio_stream)?;
        info!(
            video = video.len(),
            audio = audio.len(),
            "read elementary streams"
        );

        // The two codec runs share nothing
        let (restored_video, restored_audio) = rayon::join(
            || self.store_and_restore(&video, &paths.video_image),
            || self.store_and_restore(&audio, &paths.audio_image),
        );
        let restored_video = restored_video?;
        let restored_audio = restored_audio?;

        std::fs::write(&paths.restored_video_stream, &restored_video)?;
        std::fs::write(&paths.restored_audio_stream, &restored_audio)?;

        let report = RoundTripReport {
            video: compare("video", &video, &restored_video),
            audio: compare("audio", &audio, &restored_audio),
            output: output.map(Path::to_path_buf),
        };

        if let Some(output) = output {
            combine_streams(
                &ffmpeg,
                &self.config.stream_formats,
                &restored_video,
                &restored_audio,
                output,
            )?;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare() {
        let same = compare("video", b"abc", b"abc");
        assert!(same.matches);
        assert_eq!(same.original_len, 3);

        let different = compare("audio", b"abc", b"ab");
        assert!(!different.matches);
        assert_eq!(different.restored_len, 2);
        assert!(different.to_string().contains("MISMATCH"));
    }

    #[test]
    fn test_work_paths() {
        let paths = WorkPaths::new(
            Path::new("/tmp/work"),
            &StreamFormats::default(),
            LosslessFormat::Png,
        );
        assert_eq!(paths.video_stream, Path::new("/tmp/work/video_stream.h264"));
        assert_eq!(paths.audio_image, Path::new("/tmp/work/audio_compressed.png"));
        assert_eq!(
            paths.restored_audio_stream,
            Path::new("/tmp/work/restored_audio_stream.aac")
        );
    }

    #[test]
    fn test_store_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let payload: Vec<u8> = (0..20_000u32).map(|i| (i % 7 * 37) as u8).collect();
        let restored = RoundTrip::new()
            .store_and_restore(&payload, &dir.path().join("stream.png"))
            .unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn test_store_and_restore_bmp() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = RoundTrip::new().with_configuration(PipelineConfiguration {
            image_format: LosslessFormat::Bmp,
            ..Default::default()
        });
        let restored = pipeline
            .store_and_restore(b"bitmap storage", &dir.path().join("stream.bmp"))
            .unwrap();
        assert_eq!(restored, b"bitmap storage");
    }

    #[test]
    fn test_payload_limit() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("stream.png");
        let pipeline = RoundTrip::new().with_configuration(PipelineConfiguration {
            max_payload_size: Some(8),
            ..Default::default()
        });
        let result = pipeline.store_and_restore(b"more than eight bytes", &image_path);
        assert!(matches!(
            result,
            Err(Error::PayloadTooLarge { size: 21, limit: 8 })
        ));
        assert!(!image_path.exists());
    }

    #[test]
    fn test_report_lossless() {
        let report = RoundTripReport {
            video: compare("video", b"v", b"v"),
            audio: compare("audio", b"a", b"x"),
            output: None,
        };
        assert!(!report.is_lossless());
    }
}
