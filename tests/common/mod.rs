//! Shared test utilities for pixelframe integration tests.

#![allow(dead_code)]

use image::RgbImage;

/// Deterministic incompressible bytes (xorshift64).
pub fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Highly compressible bytes.
pub fn text(len: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Read the big-endian length prefix of an encoded image.
pub fn declared_length(image: &RgbImage) -> usize {
    let raw = image.as_raw();
    u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize
}

/// Rebuild an image of the same size around a modified pixel buffer.
pub fn with_raw(image: &RgbImage, raw: Vec<u8>) -> RgbImage {
    RgbImage::from_raw(image.width(), image.height(), raw).expect("buffer matches dimensions")
}
