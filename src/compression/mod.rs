//! Lossless byte compression for the frame payload.
//!
//! The encoder and decoder only require a symmetric pair: whatever the
//! [`Compressor`] emits, the matching [`Decompressor`] must invert exactly.
//! [`ZlibCodec`] is the default pair (zlib container, Adler-32 trailer).

pub mod zlib;

pub use zlib::{CompressionLevel, ZlibCodec};

use crate::error::{DecodingError, EncodingError};

/// Trait for compressing a payload before framing.
pub trait Compressor {
    /// Compress the whole of `source`.
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>, EncodingError>;
}

/// Trait for decompressing an extracted frame payload.
pub trait Decompressor {
    /// Decompress the whole of `source`.
    ///
    /// Must fail with [`DecodingError::CorruptStream`] on a bad header,
    /// a checksum mismatch, or a stream that ends before its final block.
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>, DecodingError>;
}
