//! Error types for pixelframe

use std::io;
use thiserror::Error;

/// Errors raised while turning a payload into an image.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The compressed payload does not fit the 4-byte length prefix
    #[error("Compressed payload of {length} bytes exceeds the 4-byte length field (max 4294967295)")]
    LengthOverflow { length: usize },

    /// The compressor failed
    #[error("Compression error: {0}")]
    Compression(String),

    /// The padded buffer does not fill the computed grid
    #[error("Buffer of {len} bytes does not fill a {width}x{height} RGB grid")]
    Layout { width: u32, height: u32, len: usize },
}

/// Errors raised while recovering a payload from an image.
#[derive(Debug, Error)]
pub enum DecodingError {
    /// Not even the length prefix could be read
    #[error("Image too small: {actual} bytes recovered, at least 4 required")]
    ImageTooSmall { actual: usize },

    /// The declared length runs past the end of the pixel data
    #[error("Truncated payload: length field declares {declared} bytes, only {available} available")]
    TruncatedPayload { declared: usize, available: usize },

    /// The compressed region is not a valid stream
    #[error("Corrupt stream: {0}")]
    CorruptStream(String),
}

/// Main error type for pixelframe operations
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The image reader or writer failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    /// The requested image format cannot store pixels exactly
    #[error("Not a lossless image format: {0}")]
    LossyFormat(String),

    /// The image is not 8-bit RGB
    #[error("Unsupported color type: {0}")]
    UnsupportedColorType(String),

    /// An external tool could not be located
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// An external tool failed to run or exited unsuccessfully
    #[error("{tool}: {message}")]
    Tool { tool: String, message: String },

    /// The payload exceeds the configured size limit
    #[error("Payload of {size} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },
}

/// Result type alias for pixelframe operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_overflow_display() {
        let err = EncodingError::LengthOverflow { length: 5_000_000_000 };
        let msg = err.to_string();
        assert!(msg.contains("5000000000"));
        assert!(msg.contains("4294967295"));
    }

    #[test]
    fn test_truncated_payload_reports_counts() {
        let err = DecodingError::TruncatedPayload {
            declared: 100,
            available: 20,
        };
        assert_eq!(
            err.to_string(),
            "Truncated payload: length field declares 100 bytes, only 20 available"
        );
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: Error = DecodingError::ImageTooSmall { actual: 3 }.into();
        assert!(matches!(
            err,
            Error::Decoding(DecodingError::ImageTooSmall { actual: 3 })
        ));
        assert_eq!(
            err.to_string(),
            "Image too small: 3 bytes recovered, at least 4 required"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
