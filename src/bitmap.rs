//! A minimal BMP codec.
//!
//! Reads and writes uncompressed Windows bitmaps at 8, 24 and 32 bits per
//! pixel. Pixels are held in memory as packed `0xAARRGGBB` values, one per
//! pixel, in the row order they are stored on disk.

use crate::error::{Error, Result};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: usize = 40;

/// How pixels are laid out on disk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
    Grayscale,
}

impl PixelFormat {
    /// The number of color channels carried per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
            PixelFormat::Grayscale => 1,
        }
    }

    fn bit_depth(&self) -> u16 {
        match self {
            PixelFormat::Rgb => 24,
            PixelFormat::Rgba => 32,
            PixelFormat::Grayscale => 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub width: usize,
    pub height: usize,
    pub pixel_format: PixelFormat,
}

/// A decoded bitmap: its header and one packed ARGB value per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub header: Header,
    pub data: Vec<u32>,
}

/// Rows are padded to 4-byte boundaries on disk.
fn row_size(width: usize, bit_depth: u16) -> usize {
    (width * bit_depth as usize + 31) / 32 * 4
}

impl Bitmap {
    /// Reads a BMP file.
    ///
    /// Fails unless the file starts with the `BM` magic and uses one of the
    /// supported bit depths (8 grayscale, 24 RGB, 32 RGBA). Color palettes
    /// other than the implied grayscale ramp are not interpreted.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Bitmap> {
        let mut file = BufReader::new(File::open(path)?);

        let mut file_header = [0u8; FILE_HEADER_SIZE];
        file.read_exact(&mut file_header)?;
        if &file_header[0..2] != b"BM" {
            return Err(Error::InvalidBitmap("missing BM magic".into()));
        }
        let pixel_offset = u32::from_le_bytes([
            file_header[10],
            file_header[11],
            file_header[12],
            file_header[13],
        ]);

        let mut info_header = [0u8; INFO_HEADER_SIZE];
        file.read_exact(&mut info_header)?;
        let width = i32::from_le_bytes([
            info_header[4],
            info_header[5],
            info_header[6],
            info_header[7],
        ]);
        let height = i32::from_le_bytes([
            info_header[8],
            info_header[9],
            info_header[10],
            info_header[11],
        ]);
        let bit_depth = u16::from_le_bytes([info_header[14], info_header[15]]);
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidBitmap(format!(
                "unsupported dimensions: {}x{}",
                width, height
            )));
        }
        let width = width as usize;
        let height = height as usize;

        let pixel_format = match bit_depth {
            8 => PixelFormat::Grayscale,
            24 => PixelFormat::Rgb,
            32 => PixelFormat::Rgba,
            other => return Err(Error::UnsupportedBitDepth(other)),
        };
        let bytes_per_pixel = bit_depth as usize / 8;
        let row_size = row_size(width, bit_depth);

        file.seek(SeekFrom::Start(pixel_offset as u64))?;
        let mut raw = vec![0u8; row_size * height];
        file.read_exact(&mut raw)?;

        let mut data = vec![0u32; width * height];
        for y in 0..height {
            for x in 0..width {
                let base = y * row_size + x * bytes_per_pixel;
                data[y * width + x] = if pixel_format == PixelFormat::Grayscale {
                    let gray = raw[base] as u32;
                    0xFF00_0000 | (gray << 16) | (gray << 8) | gray
                } else {
                    let b = raw[base] as u32;
                    let g = raw[base + 1] as u32;
                    let r = raw[base + 2] as u32;
                    let a = if pixel_format == PixelFormat::Rgba {
                        raw[base + 3] as u32
                    } else {
                        0xFF
                    };
                    (a << 24) | (r << 16) | (g << 8) | b
                };
            }
        }

        Ok(Bitmap {
            header: Header {
                width,
                height,
                pixel_format,
            },
            data,
        })
    }

    /// Writes the bitmap as a BMP file, including a 256-entry grayscale
    /// palette for 8-bit output.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);

        let width = self.header.width;
        let height = self.header.height;
        let pixel_format = self.header.pixel_format;
        let bit_depth = pixel_format.bit_depth();
        let bytes_per_pixel = bit_depth as usize / 8;

        let palette_size = if pixel_format == PixelFormat::Grayscale {
            256 * 4
        } else {
            0
        };
        let row_size = row_size(width, bit_depth);
        let data_size = row_size * height;
        let pixel_offset =
            (FILE_HEADER_SIZE + INFO_HEADER_SIZE + palette_size) as u32;
        let file_size = pixel_offset + data_size as u32;

        let mut file_header = [0u8; FILE_HEADER_SIZE];
        file_header[0..2].copy_from_slice(b"BM");
        file_header[2..6].copy_from_slice(&file_size.to_le_bytes());
        file_header[10..14].copy_from_slice(&pixel_offset.to_le_bytes());
        file.write_all(&file_header)?;

        let mut info_header = [0u8; INFO_HEADER_SIZE];
        info_header[0..4].copy_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
        info_header[4..8].copy_from_slice(&(width as i32).to_le_bytes());
        info_header[8..12].copy_from_slice(&(height as i32).to_le_bytes());
        info_header[12..14].copy_from_slice(&1u16.to_le_bytes()); // planes
        info_header[14..16].copy_from_slice(&bit_depth.to_le_bytes());
        file.write_all(&info_header)?;

        if pixel_format == PixelFormat::Grayscale {
            let mut palette = [0u8; 256 * 4];
            for i in 0..256 {
                palette[i * 4] = i as u8; // blue
                palette[i * 4 + 1] = i as u8; // green
                palette[i * 4 + 2] = i as u8; // red
            }
            file.write_all(&palette)?;
        }

        let mut raw = vec![0u8; data_size];
        for y in 0..height {
            for x in 0..width {
                let pixel = self.data[y * width + x];
                let base = y * row_size + x * bytes_per_pixel;
                match pixel_format {
                    PixelFormat::Grayscale => {
                        raw[base] = (pixel & 0xFF) as u8;
                    }
                    PixelFormat::Rgb => {
                        raw[base] = (pixel & 0xFF) as u8;
                        raw[base + 1] = ((pixel >> 8) & 0xFF) as u8;
                        raw[base + 2] = ((pixel >> 16) & 0xFF) as u8;
                    }
                    PixelFormat::Rgba => {
                        raw[base] = (pixel & 0xFF) as u8;
                        raw[base + 1] = ((pixel >> 8) & 0xFF) as u8;
                        raw[base + 2] = ((pixel >> 16) & 0xFF) as u8;
                        raw[base + 3] = ((pixel >> 24) & 0xFF) as u8;
                    }
                }
            }
        }
        file.write_all(&raw)?;
        Ok(())
    }

    /// Converts to grayscale using the luma weights `0.3r + 0.59g + 0.11b`,
    /// replicating the result across all three color channels with full
    /// alpha.
    pub fn to_grayscale(&self) -> Bitmap {
        let data = self
            .data
            .iter()
            .map(|&pixel| {
                let r = ((pixel >> 16) & 0xFF) as f64;
                let g = ((pixel >> 8) & 0xFF) as f64;
                let b = (pixel & 0xFF) as f64;
                let gray =
                    ((0.3 * r + 0.59 * g + 0.11 * b) as u32).clamp(0, 255);
                0xFF00_0000 | (gray << 16) | (gray << 8) | gray
            })
            .collect();
        Bitmap {
            header: Header {
                pixel_format: PixelFormat::Grayscale,
                ..self.header.clone()
            },
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("autoenkoder_{}_{}", std::process::id(), name));
        path
    }

    #[test]
    fn color_write_read_round_trip() {
        let bitmap = Bitmap {
            header: Header {
                width: 3,
                height: 2,
                pixel_format: PixelFormat::Rgb,
            },
            data: vec![
                0xFF102030, 0xFF405060, 0xFF708090, 0xFFA0B0C0, 0xFF000000,
                0xFFFFFFFF,
            ],
        };

        let path = temp_path("color.bmp");
        bitmap.write(&path).unwrap();
        let read_back = Bitmap::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read_back, bitmap);
    }

    #[test]
    fn grayscale_write_read_round_trip() {
        let bitmap = Bitmap {
            header: Header {
                width: 2,
                height: 2,
                pixel_format: PixelFormat::Grayscale,
            },
            // Read expands the stored byte to all three channels.
            data: vec![0xFF000000, 0xFF404040, 0xFF808080, 0xFFFFFFFF],
        };

        let path = temp_path("gray.bmp");
        bitmap.write(&path).unwrap();
        let read_back = Bitmap::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read_back, bitmap);
    }

    #[test]
    fn rejects_non_bmp_data() {
        let path = temp_path("garbage.bmp");
        std::fs::write(&path, b"PNG, actually. And some padding bytes.......")
            .unwrap();
        let result = Bitmap::read(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::InvalidBitmap(_))));
    }

    #[test]
    fn grayscale_conversion_weights() {
        let bitmap = Bitmap {
            header: Header {
                width: 1,
                height: 1,
                pixel_format: PixelFormat::Rgb,
            },
            data: vec![0xFFFF0000], // pure red
        };
        let gray = bitmap.to_grayscale();
        assert_eq!(gray.header.pixel_format, PixelFormat::Grayscale);
        // 0.3 * 255 = 76.5, truncated to 76
        assert_eq!(gray.data[0], 0xFF4C4C4C);
    }
}
