//! Lossless image file boundary.
//!
//! Encoded images only survive storage if every pixel comes back unchanged,
//! so reading and writing is restricted to lossless formats and to 8-bit RGB
//! pixel data. The decoder takes width and height from the stored image.

use crate::decoder::ImageDecoder;
use crate::encoder::ImageEncoder;
use crate::error::{Error, Result};
use crate::layout::ImageDimensions;
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

/// Image formats that store 8-bit RGB pixels exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LosslessFormat {
    #[default]
    Png,
    Bmp,
    Tiff,
}

impl LosslessFormat {
    /// Pick a format from a file extension.
    ///
    /// Lossy or unknown extensions are rejected.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "tif" | "tiff" => Ok(Self::Tiff),
            "" => Err(Error::LossyFormat("missing file extension".to_string())),
            other => Err(Error::LossyFormat(other.to_string())),
        }
    }

    /// Map an `image` crate format back onto a lossless one.
    pub fn from_image_format(format: ImageFormat) -> Result<Self> {
        match format {
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Bmp => Ok(Self::Bmp),
            ImageFormat::Tiff => Ok(Self::Tiff),
            other => Err(Error::LossyFormat(format!("{other:?}"))),
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }
}

impl fmt::Display for LosslessFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Accept only 8-bit RGB images; any conversion would alter pixel bytes.
fn into_rgb8(image: DynamicImage) -> Result<RgbImage> {
    match image {
        DynamicImage::ImageRgb8(rgb) => Ok(rgb),
        other => Err(Error::UnsupportedColorType(format!("{:?}", other.color()))),
    }
}

/// Write `image` to `path` in `format`.
pub fn save_image<P: AsRef<Path>>(path: P, image: &RgbImage, format: LosslessFormat) -> Result<()> {
    image.save_with_format(path.as_ref(), format.image_format())?;
    Ok(())
}

/// Read an 8-bit RGB image from `path`, detecting the format from its content.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let reader = ImageReader::open(path.as_ref())?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| Error::LossyFormat("unrecognized image data".to_string()))?;
    LosslessFormat::from_image_format(format)?;
    into_rgb8(reader.decode()?)
}

/// Serialize `image` into an in-memory file.
pub fn write_image_bytes(image: &RgbImage, format: LosslessFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format.image_format())?;
    Ok(buf.into_inner())
}

/// Parse an in-memory image file.
pub fn read_image_bytes(data: &[u8]) -> Result<RgbImage> {
    let format = image::guess_format(data)?;
    LosslessFormat::from_image_format(format)?;
    into_rgb8(image::load_from_memory_with_format(data, format)?)
}

/// Encode the file at `input` into an image at `output`.
///
/// The image format follows the extension of `output`.
pub fn encode_file<P: AsRef<Path>, Q: AsRef<Path>>(
    encoder: &ImageEncoder,
    input: P,
    output: Q,
) -> Result<ImageDimensions> {
    let format = LosslessFormat::from_path(output.as_ref())?;
    let payload = std::fs::read(input.as_ref())?;
    let image = encoder.encode(&payload)?;
    save_image(output.as_ref(), &image, format)?;

    let dims = ImageDimensions {
        width: image.width(),
        height: image.height(),
    };
    info!(
        input = %input.as_ref().display(),
        output = %output.as_ref().display(),
        bytes = payload.len(),
        width = dims.width,
        height = dims.height,
        "encoded file into image"
    );
    Ok(dims)
}

/// Decode the image at `image_path` and write the payload to `output`.
pub fn decode_file<P: AsRef<Path>, Q: AsRef<Path>>(
    decoder: &ImageDecoder,
    image_path: P,
    output: Q,
) -> Result<usize> {
    let image = load_image(image_path.as_ref())?;
    let payload = decoder.decode(&image)?;
    std::fs::write(output.as_ref(), &payload)?;

    info!(
        image = %image_path.as_ref().display(),
        output = %output.as_ref().display(),
        bytes = payload.len(),
        "decoded image into file"
    );
    Ok(payload.len())
}
