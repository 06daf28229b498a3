//! Near-square grid dimensioning.

use crate::frame::CHANNELS;

/// Width and height of the RGB grid holding a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Dimensions for `total_pixels`: `width = ceil(sqrt(n))`, `height = ceil(n / width)`.
    ///
    /// A zero pixel count still yields a 1x1 grid.
    pub fn for_pixels(total_pixels: u64) -> Self {
        let n = total_pixels.max(1);
        let width = ceil_sqrt(n);
        let height = n.div_ceil(width);
        Self {
            width: width as u32,
            height: height as u32,
        }
    }

    /// Dimensions for a channel-aligned buffer of `byte_len` bytes.
    pub fn for_bytes(byte_len: usize) -> Self {
        Self::for_pixels((byte_len as u64).div_ceil(CHANNELS as u64))
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Bytes needed to fill every pixel of the grid.
    pub fn byte_len(&self) -> usize {
        self.pixel_count() as usize * CHANNELS
    }
}

/// Smallest `r` with `r * r >= n`.
fn ceil_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).sqrt() as u64;
    // f64 rounding can land one off in either direction for large n
    while r > 0 && r * r >= n {
        r -= 1;
    }
    while r * r < n {
        r += 1;
    }
    r
}
