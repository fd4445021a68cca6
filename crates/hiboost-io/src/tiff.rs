//! TIFF format support.
//!
//! Reads 8/16-bit integer and 32-bit float grayscale, grayscale+alpha, RGB
//! and RGBA. Float files load into [`Domain::Unit`].
//!
//! Writes LZW-compressed 8-bit, or 16-bit when the buffer domain is
//! [`Domain::U16`].

use crate::{ImageReader, ImageWriter, IoError, IoResult};
use hiboost_core::{Domain, PixelBuffer};
use std::io::Cursor;
use std::path::Path;

/// TIFF reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffCodec;

impl ImageReader for TiffCodec {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        use tiff::ColorType;
        use tiff::decoder::{Decoder, DecodingResult};

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(IoError::decode)?;
        let (width, height) = decoder.dimensions().map_err(IoError::decode)?;
        let color_type = decoder.colortype().map_err(IoError::decode)?;
        let (width, height) = (width as usize, height as usize);

        let channels = match color_type {
            ColorType::Gray(_) => 1,
            ColorType::GrayA(_) => 2,
            ColorType::RGB(_) => 3,
            ColorType::RGBA(_) => 4,
            other => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "unsupported TIFF color type: {other:?}"
                )));
            }
        };

        let buffer = match decoder.read_image().map_err(IoError::decode)? {
            DecodingResult::U8(buf) => PixelBuffer::from_u8(height, width, channels, &buf)?,
            DecodingResult::U16(buf) => PixelBuffer::from_u16(height, width, channels, &buf)?,
            DecodingResult::F32(buf) => {
                PixelBuffer::from_data(height, width, channels, Domain::Unit, buf)?
            }
            _ => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "unsupported TIFF sample format: {color_type:?}"
                )));
            }
        };
        Ok(buffer)
    }
}

impl ImageWriter for TiffCodec {
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        use tiff::encoder::{Compression, TiffEncoder, colortype};

        let width = u32::try_from(image.width()).map_err(IoError::encode)?;
        let height = u32::try_from(image.height()).map_err(IoError::encode)?;
        let wide = image.domain() == Domain::U16;

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut cursor)
                .map_err(IoError::encode)?
                .with_compression(Compression::Lzw);
            let written = match (image.channels(), wide) {
                (1, false) => encoder.write_image::<colortype::Gray8>(
                    width, height, &image.to_u8(),
                ),
                (3, false) => encoder.write_image::<colortype::RGB8>(
                    width, height, &image.to_u8(),
                ),
                (4, false) => encoder.write_image::<colortype::RGBA8>(
                    width, height, &image.to_u8(),
                ),
                (1, true) => encoder.write_image::<colortype::Gray16>(
                    width, height, &image.to_u16(),
                ),
                (3, true) => encoder.write_image::<colortype::RGB16>(
                    width, height, &image.to_u16(),
                ),
                (4, true) => encoder.write_image::<colortype::RGBA16>(
                    width, height, &image.to_u16(),
                ),
                (n, _) => {
                    return Err(IoError::Encode(format!("unsupported channel count: {n}")));
                }
            };
            written.map_err(IoError::encode)?;
        }
        Ok(cursor.into_inner())
    }
}

/// Reads a TIFF file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    TiffCodec.read(path)
}

/// Writes an image to a TIFF file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    TiffCodec.write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_rgb8() {
        let data: Vec<u8> = (0..32 * 32 * 3).map(|i| (i % 251) as u8).collect();
        let image = PixelBuffer::from_u8(32, 32, 3, &data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.tiff");
        write(&path, &image).expect("Failed to write TIFF");
        let loaded = read(&path).expect("Failed to read TIFF");

        assert_eq!(loaded.shape(), (32, 32, 3));
        assert_eq!(loaded.domain(), Domain::U8);
        assert_eq!(loaded.to_u8(), data);
    }

    #[test]
    fn test_roundtrip_gray16() {
        let data: Vec<u16> = (0..7 * 9).map(|i| (i * 997) as u16).collect();
        let image = PixelBuffer::from_u16(7, 9, 1, &data).unwrap();
        let loaded = TiffCodec
            .read_from_memory(&TiffCodec.write_to_memory(&image).unwrap())
            .unwrap();
        assert_eq!(loaded.shape(), (7, 9, 1));
        assert_eq!(loaded.domain(), Domain::U16);
        assert_eq!(loaded.to_u16(), data);
    }

    #[test]
    fn test_read_float_as_unit() {
        use tiff::encoder::{TiffEncoder, colortype};

        let data: Vec<f32> = (0..4 * 4 * 3).map(|i| i as f32 / 48.0).collect();
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut cursor).unwrap();
            encoder
                .write_image::<colortype::RGB32Float>(4, 4, &data)
                .unwrap();
        }

        let loaded = TiffCodec.read_from_memory(cursor.get_ref()).unwrap();
        assert_eq!(loaded.shape(), (4, 4, 3));
        assert_eq!(loaded.domain(), Domain::Unit);
        assert_eq!(loaded.data(), data.as_slice());
    }

    #[test]
    fn test_two_channels_rejected() {
        let image = PixelBuffer::filled(2, 2, 2, Domain::U8, 1.0).unwrap();
        assert!(matches!(
            TiffCodec.write_to_memory(&image),
            Err(IoError::Encode(_))
        ));
    }
}
