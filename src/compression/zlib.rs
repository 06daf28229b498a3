//! zlib compression and decompression backed by `flate2`.

use super::{Compressor, Decompressor};
use crate::error::{DecodingError, EncodingError};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Write;

/// Smallest output buffer handed to the inflater.
const MIN_OUTPUT_CHUNK: usize = 256;

/// Compression level in the zlib range `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// No compression; deflate stored blocks only.
    pub const NONE: Self = Self(0);
    /// Fastest compression.
    pub const FAST: Self = Self(1);
    /// Best compression ratio.
    pub const BEST: Self = Self(9);

    /// Create a level, clamping values above 9.
    pub fn new(level: u32) -> Self {
        Self(level.min(9))
    }

    /// The numeric level.
    pub fn level(&self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(6)
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        Compression::new(level.0)
    }
}

/// Symmetric zlib compressor/decompressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibCodec {
    level: CompressionLevel,
}

impl ZlibCodec {
    pub fn new(level: CompressionLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }
}

impl Compressor for ZlibCodec {
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>, EncodingError> {
        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(source.len() / 2 + 16),
            self.level.into(),
        );
        encoder
            .write_all(source)
            .map_err(|e| EncodingError::Compression(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| EncodingError::Compression(e.to_string()))
    }
}

impl Decompressor for ZlibCodec {
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>, DecodingError> {
        let mut inflater = Decompress::new(true);
        let mut output = Vec::with_capacity(source.len().saturating_mul(4).max(MIN_OUTPUT_CHUNK));

        loop {
            if output.len() == output.capacity() {
                output.reserve(output.len().max(MIN_OUTPUT_CHUNK));
            }

            let consumed = inflater.total_in() as usize;
            let produced = inflater.total_out();

            let status = inflater
                .decompress_vec(&source[consumed..], &mut output, FlushDecompress::None)
                .map_err(|e| DecodingError::CorruptStream(e.to_string()))?;

            match status {
                Status::StreamEnd => break,
                Status::Ok | Status::BufError => {
                    let stalled = inflater.total_in() as usize == consumed
                        && inflater.total_out() == produced;
                    // A stall with spare output space means the input ran out mid-stream
                    if stalled && output.len() < output.capacity() {
                        return Err(DecodingError::CorruptStream(format!(
                            "stream ended unexpectedly after {} of {} bytes",
                            consumed,
                            source.len()
                        )));
                    }
                }
            }
        }

        let consumed = inflater.total_in() as usize;
        if consumed != source.len() {
            return Err(DecodingError::CorruptStream(format!(
                "{} trailing bytes after end of stream",
                source.len() - consumed
            )));
        }

        Ok(output)
    }
}
