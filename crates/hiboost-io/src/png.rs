//! PNG format support.
//!
//! Reads 8-bit and 16-bit grayscale, grayscale+alpha, RGB and RGBA files.
//! Palette and sub-byte images are expanded to 8-bit on decode. Grayscale
//! stays single-channel.
//!
//! Writes 16-bit when the buffer domain is [`Domain::U16`], 8-bit otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! use hiboost_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{ImageReader, ImageWriter, IoError, IoResult};
use hiboost_core::{Domain, PixelBuffer};
use std::io::Cursor;
use std::path::Path;

/// PNG reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageReader for PngCodec {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder.read_info().map_err(IoError::decode)?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::Decode("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader.next_frame(&mut buf).map_err(IoError::decode)?;

        let width = info.width as usize;
        let height = info.height as usize;
        let bytes = &buf[..info.buffer_size()];

        let channels = match info.color_type {
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            other => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{other:?} {:?}",
                    info.bit_depth
                )));
            }
        };

        let buffer = match info.bit_depth {
            png::BitDepth::Eight => PixelBuffer::from_u8(height, width, channels, bytes)?,
            png::BitDepth::Sixteen => {
                PixelBuffer::from_u16(height, width, channels, &be_bytes_to_u16(bytes))?
            }
            other => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {other:?}",
                    info.color_type
                )));
            }
        };
        Ok(buffer)
    }
}

impl ImageWriter for PngCodec {
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        let color_type = match image.channels() {
            1 => png::ColorType::Grayscale,
            2 => png::ColorType::GrayscaleAlpha,
            3 => png::ColorType::Rgb,
            4 => png::ColorType::Rgba,
            n => return Err(IoError::Encode(format!("unsupported channel count: {n}"))),
        };
        let width = u32::try_from(image.width()).map_err(IoError::encode)?;
        let height = u32::try_from(image.height()).map_err(IoError::encode)?;

        let (depth, samples) = if image.domain() == Domain::U16 {
            let bytes = image.to_u16().iter().flat_map(|v| v.to_be_bytes()).collect();
            (png::BitDepth::Sixteen, bytes)
        } else {
            (png::BitDepth::Eight, image.to_u8())
        };

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(depth);
            encoder.set_compression(png::Compression::default());

            let mut writer = encoder.write_header().map_err(IoError::encode)?;
            writer.write_image_data(&samples).map_err(IoError::encode)?;
            writer.finish().map_err(IoError::encode)?;
        }
        Ok(out)
    }
}

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    PngCodec.read(path)
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    PngCodec.write(path, image)
}

/// Converts big-endian byte slice to u16 vector.
fn be_bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}
