//! RGB image → payload decoder.

use crate::compression::{Decompressor, ZlibCodec};
use crate::error::DecodingError;
use crate::frame::{parse_frame, LENGTH_PREFIX_SIZE};
use image::RgbImage;
use tracing::debug;

/// Recovers a payload from an image produced by [`crate::ImageEncoder`].
///
/// Width and height come from the image itself; the flattened pixel data is
/// read row-major, channel-interleaved, exactly as the encoder laid it out.
#[derive(Debug, Clone, Default)]
pub struct ImageDecoder {
    codec: ZlibCodec,
}

impl ImageDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the payload carried by `image`.
    pub fn decode(&self, image: &RgbImage) -> Result<Vec<u8>, DecodingError> {
        debug!(
            width = image.width(),
            height = image.height(),
            "decoding image"
        );
        self.decode_bytes(image.as_raw())
    }

    /// Decode a flattened pixel buffer.
    pub fn decode_bytes(&self, flat: &[u8]) -> Result<Vec<u8>, DecodingError> {
        self.decode_bytes_with(&self.codec, flat)
    }

    /// Decode a flattened pixel buffer with a caller-supplied decompressor.
    pub fn decode_bytes_with<D: Decompressor>(
        &self,
        decompressor: &D,
        flat: &[u8],
    ) -> Result<Vec<u8>, DecodingError> {
        let compressed = parse_frame(flat)?;

        // Nothing was framed, so there is no stream to inflate
        if compressed.is_empty() {
            return Ok(Vec::new());
        }

        let payload = decompressor.decompress(compressed)?;
        debug!(
            compressed = compressed.len(),
            padding = flat.len() - LENGTH_PREFIX_SIZE - compressed.len(),
            payload = payload.len(),
            "decoded frame"
        );
        Ok(payload)
    }
}

/// Decode the payload carried by `image` using default settings.
pub fn decode(image: &RgbImage) -> Result<Vec<u8>, DecodingError> {
    ImageDecoder::new().decode(image)
}
