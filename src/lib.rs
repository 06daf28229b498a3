//! # pixelframe
//!
//! A reversible binary-to-image codec: arbitrary bytes are compressed,
//! length-prefixed, and packed into the pixels of an RGB image that can later
//! be decoded back into exactly the original bytes.
//!
//! ## Frame format
//!
//! ```text
//! [4 bytes: big-endian u32 N][N bytes: zlib stream][zero padding]
//! ```
//!
//! The frame is padded to a multiple of 3 bytes, then with whole zero pixels
//! until it fills a near-square grid (`width = ceil(sqrt(pixels))`,
//! `height = ceil(pixels / width)`). Pixels are laid out row-major, one RGB
//! triple each.
//!
//! ## Quick Start
//!
//! ```rust
//! let image = pixelframe::encode(b"hello world")?;
//! assert_eq!(image.dimensions(), (3, 3));
//!
//! let payload = pixelframe::decode(&image)?;
//! assert_eq!(payload, b"hello world");
//! # Ok::<(), pixelframe::Error>(())
//! ```
//!
//! The image must be stored in a lossless format; see [`image_io`].
//!
//! ## Architecture
//!
//! - [`compression`] - `Compressor`/`Decompressor` seam, zlib implementation
//! - [`frame`] - length prefix and channel-alignment padding
//! - [`layout`] - grid dimensioning
//! - [`encoder`] / [`decoder`] - the codec itself, pure in-memory transforms
//! - [`image_io`] - lossless image files and file-to-image helpers
//! - [`media`] - `ffmpeg` stream extraction and muxing
//! - [`pipeline`] - video → images → video round trip

#![warn(rustdoc::missing_crate_level_docs)]

pub mod compression;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod image_io;
pub mod layout;
pub mod media;
pub mod pipeline;

// Re-export commonly used types
pub use compression::{CompressionLevel, Compressor, Decompressor, ZlibCodec};
pub use decoder::{decode, ImageDecoder};
pub use encoder::{encode, EncoderConfiguration, ImageEncoder};
pub use error::{DecodingError, EncodingError, Error, Result};
pub use image_io::{decode_file, encode_file, load_image, save_image, LosslessFormat};
pub use layout::ImageDimensions;
pub use pipeline::{PipelineConfiguration, RoundTrip, RoundTripReport, StreamReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_codec_roundtrip() {
        let image = encode(b"pixelframe").unwrap();
        assert_eq!(decode(&image).unwrap(), b"pixelframe");
    }
}
