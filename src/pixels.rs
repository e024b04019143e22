//! Transforms between packed pixel data and training vectors.
//!
//! Each packed ARGB value is split into its channels and flattened to one
//! normalized float per channel. Feeding whole packed 32-bit values to the
//! network instead would force it to learn arbitrary integer encodings and
//! produces heavily color-shifted reconstructions.

use crate::bitmap::{Bitmap, PixelFormat};
use crate::error::{Error, Result};

/// Flattens a bitmap into a `[0, 1]`-normalized feature vector with one
/// float per color channel (three for RGB, four for RGBA, one for
/// grayscale).
pub fn to_training_vector(bitmap: &Bitmap) -> Vec<f64> {
    let channels = bitmap.header.pixel_format.channels();
    let mut transformed = Vec::with_capacity(bitmap.data.len() * channels);
    for &pixel in &bitmap.data {
        match bitmap.header.pixel_format {
            PixelFormat::Rgb => {
                transformed.push(((pixel >> 16) & 0xFF) as f64 / 255.0);
                transformed.push(((pixel >> 8) & 0xFF) as f64 / 255.0);
                transformed.push((pixel & 0xFF) as f64 / 255.0);
            }
            PixelFormat::Rgba => {
                transformed.push(((pixel >> 16) & 0xFF) as f64 / 255.0);
                transformed.push(((pixel >> 8) & 0xFF) as f64 / 255.0);
                transformed.push((pixel & 0xFF) as f64 / 255.0);
                transformed.push(((pixel >> 24) & 0xFF) as f64 / 255.0);
            }
            PixelFormat::Grayscale => {
                transformed.push((pixel & 0xFF) as f64 / 255.0);
            }
        }
    }
    transformed
}

/// Packs a normalized feature vector back into pixel data.
///
/// Each channel is scaled to `[0, 255]`, clamped, and packed as
/// `0xAARRGGBB`. Alpha is forced to 255 except for RGBA input; grayscale
/// values are replicated across all three color channels, matching how
/// [`Bitmap::read`] expands 8-bit pixels.
///
/// Fails unless the vector length is a multiple of the format's channel
/// count.
pub fn to_pixel_data(
    pixel_format: PixelFormat,
    data: &[f64],
) -> Result<Vec<u32>> {
    let channels = pixel_format.channels();
    if data.len() % channels != 0 {
        return Err(Error::BadVectorLength {
            len: data.len(),
            channels,
        });
    }

    let pack = |v: f64| (v * 255.0).clamp(0.0, 255.0) as u32;
    let transformed = data
        .chunks_exact(channels)
        .map(|pixel| match pixel_format {
            PixelFormat::Rgb => {
                let (r, g, b) = (pack(pixel[0]), pack(pixel[1]), pack(pixel[2]));
                (0xFF << 24) | (r << 16) | (g << 8) | b
            }
            PixelFormat::Rgba => {
                let (r, g, b) = (pack(pixel[0]), pack(pixel[1]), pack(pixel[2]));
                let a = pack(pixel[3]);
                (a << 24) | (r << 16) | (g << 8) | b
            }
            PixelFormat::Grayscale => {
                let gray = pack(pixel[0]);
                (0xFF << 24) | (gray << 16) | (gray << 8) | gray
            }
        })
        .collect();
    Ok(transformed)
}

/// Normalizes the low byte of each packed pixel to `[0, 1]`.
///
/// A shortcut for grayscale bitmaps, where all three channels carry the same
/// value.
pub fn normalize_bytes(data: &[u32]) -> Vec<f64> {
    data.iter().map(|&pixel| (pixel & 0xFF) as f64 / 255.0).collect()
}
