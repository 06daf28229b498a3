//! Payload → RGB image encoder.

use crate::compression::{CompressionLevel, Compressor, ZlibCodec};
use crate::error::EncodingError;
use crate::frame::build_frame;
use crate::layout::ImageDimensions;
use image::RgbImage;
use tracing::debug;

/// Configuration for the image encoder.
#[derive(Debug, Clone, Default)]
pub struct EncoderConfiguration {
    /// zlib level used for the payload.
    ///
    /// Default: 6.
    pub compression: CompressionLevel,
}

/// Encodes arbitrary bytes into the pixel grid of an RGB image.
///
/// # Pipeline
///
/// 1. Compress the payload.
/// 2. Prefix the compressed length (big-endian u32).
/// 3. Zero-pad to a multiple of 3 bytes.
/// 4. Pick a near-square `width x height` grid and zero-fill the last pixels.
/// 5. Lay the buffer out row-major, one RGB triple per pixel.
///
/// The result must be stored in a lossless format for [`crate::decode`] to
/// recover the payload.
#[derive(Debug, Clone, Default)]
pub struct ImageEncoder {
    config: EncoderConfiguration,
}

impl ImageEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoder configuration.
    pub fn with_configuration(mut self, config: EncoderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Encode `payload` with the configured zlib level.
    pub fn encode(&self, payload: &[u8]) -> Result<RgbImage, EncodingError> {
        self.encode_with(&ZlibCodec::new(self.config.compression), payload)
    }

    /// Encode `payload` with a caller-supplied compressor.
    pub fn encode_with<C: Compressor>(
        &self,
        compressor: &C,
        payload: &[u8],
    ) -> Result<RgbImage, EncodingError> {
        let compressed = compressor.compress(payload)?;
        let mut buffer = build_frame(&compressed)?;

        let dims = ImageDimensions::for_bytes(buffer.len());
        buffer.resize(dims.byte_len(), 0);

        debug!(
            payload = payload.len(),
            compressed = compressed.len(),
            width = dims.width,
            height = dims.height,
            "encoded frame"
        );

        let len = buffer.len();
        RgbImage::from_raw(dims.width, dims.height, buffer).ok_or(EncodingError::Layout {
            width: dims.width,
            height: dims.height,
            len,
        })
    }
}

/// Encode `payload` into an RGB image using default settings.
pub fn encode(payload: &[u8]) -> Result<RgbImage, EncodingError> {
    ImageEncoder::new().encode(payload)
}
