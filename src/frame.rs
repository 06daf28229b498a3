//! Length-prefixed framing of the compressed payload.
//!
//! ```text
//! [4 bytes: big-endian u32 N][N bytes: compressed payload][zero padding]
//! ```
//!
//! The length field counts only the compressed bytes; padding that follows is
//! never accounted for and is dropped on decode.

use crate::error::{DecodingError, EncodingError};
use byteorder::{BigEndian, ByteOrder};

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Bytes per pixel (one RGB triple).
pub const CHANNELS: usize = 3;

/// Validate that a compressed length fits the 4-byte prefix.
pub fn frame_length(len: usize) -> Result<u32, EncodingError> {
    u32::try_from(len).map_err(|_| EncodingError::LengthOverflow { length: len })
}

/// Number of zero bytes needed to bring `len` to a multiple of [`CHANNELS`].
pub fn structural_padding(len: usize) -> usize {
    (CHANNELS - len % CHANNELS) % CHANNELS
}

/// Build `big_endian_u32(len) ++ compressed`, zero-padded to a whole number of pixels.
pub fn build_frame(compressed: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let length = frame_length(compressed.len())?;
    let unpadded = LENGTH_PREFIX_SIZE + compressed.len();
    let padding = structural_padding(unpadded);

    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    BigEndian::write_u32(&mut prefix, length);

    let mut frame = Vec::with_capacity(unpadded + padding);
    frame.extend_from_slice(&prefix);
    frame.extend_from_slice(compressed);
    frame.resize(unpadded + padding, 0);
    Ok(frame)
}

/// Read the length prefix and return the compressed region it describes.
///
/// Bytes past `4 + N` are ignored.
pub fn parse_frame(flat: &[u8]) -> Result<&[u8], DecodingError> {
    if flat.len() < LENGTH_PREFIX_SIZE {
        return Err(DecodingError::ImageTooSmall { actual: flat.len() });
    }

    let declared = BigEndian::read_u32(&flat[..LENGTH_PREFIX_SIZE]) as usize;
    let available = flat.len() - LENGTH_PREFIX_SIZE;
    if declared > available {
        return Err(DecodingError::TruncatedPayload {
            declared,
            available,
        });
    }

    Ok(&flat[LENGTH_PREFIX_SIZE..LENGTH_PREFIX_SIZE + declared])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_padding() {
        assert_eq!(structural_padding(0), 0);
        assert_eq!(structural_padding(4), 2);
        assert_eq!(structural_padding(5), 1);
        assert_eq!(structural_padding(6), 0);
        assert_eq!(structural_padding(23), 1);
    }

    #[test]
    fn test_build_frame_layout() {
        let frame = build_frame(&[0xAA; 19]).unwrap();
        assert_eq!(frame.len(), 24);
        assert_eq!(&frame[..4], &[0, 0, 0, 19]);
        assert!(frame[4..23].iter().all(|&b| b == 0xAA));
        assert_eq!(frame[23], 0);
    }

    #[test]
    fn test_build_frame_big_endian() {
        let frame = build_frame(&vec![1u8; 0x0102]).unwrap();
        assert_eq!(&frame[..4], &[0x00, 0x00, 0x01, 0x02]);
        assert_eq!(frame.len() % CHANNELS, 0);
    }

    #[test]
    fn test_empty_frame() {
        let frame = build_frame(&[]).unwrap();
        assert_eq!(frame, vec![0u8; 6]);
        assert!(parse_frame(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_parse_ignores_padding() {
        let mut flat = vec![0, 0, 0, 3, 7, 8, 9];
        flat.extend_from_slice(&[0; 11]);
        assert_eq!(parse_frame(&flat).unwrap(), &[7, 8, 9]);
    }

    #[test]
    fn test_parse_too_small() {
        assert!(matches!(
            parse_frame(&[0, 0, 0]),
            Err(DecodingError::ImageTooSmall { actual: 3 })
        ));
    }

    #[test]
    fn test_parse_exactly_four_zero_bytes() {
        assert!(parse_frame(&[0, 0, 0, 0]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_truncated() {
        let flat = [0, 0, 0, 10, 1, 2, 3];
        match parse_frame(&flat) {
            Err(DecodingError::TruncatedPayload {
                declared,
                available,
            }) => {
                assert_eq!(declared, 10);
                assert_eq!(available, 3);
            }
            other => panic!("expected TruncatedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_max_declared_length() {
        let flat = [0xFF, 0xFF, 0xFF, 0xFF, 0, 0];
        assert!(matches!(
            parse_frame(&flat),
            Err(DecodingError::TruncatedPayload { declared: 0xFFFF_FFFF, .. })
        ));
    }

    #[test]
    fn test_frame_length_limits() {
        assert_eq!(frame_length(0).unwrap(), 0);
        assert_eq!(frame_length(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_frame_length_overflow() {
        let len = u32::MAX as usize + 1;
        assert!(matches!(
            frame_length(len),
            Err(EncodingError::LengthOverflow { length }) if length == len
        ));
    }
}
