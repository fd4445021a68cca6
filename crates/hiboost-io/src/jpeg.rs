//! JPEG format support.
//!
//! Decodes 8-bit grayscale, RGB and CMYK (converted to RGB) plus 16-bit
//! lossless grayscale. Encodes 8-bit grayscale or RGB; alpha is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use hiboost_io::jpeg::{JpegCodec, JpegOptions};
//! use hiboost_io::ImageWriter;
//!
//! let codec = JpegCodec::with_options(JpegOptions { quality: 95 });
//! codec.write("highq.jpg", &image)?;
//! ```

use crate::{ImageReader, ImageWriter, IoError, IoResult};
use hiboost_core::PixelBuffer;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    /// Quality level 1-100. Default: 90.
    pub quality: u8,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// JPEG reader and writer.
#[derive(Debug, Clone, Default)]
pub struct JpegCodec {
    options: JpegOptions,
}

impl JpegCodec {
    /// Creates a codec with default options (quality 90).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with custom options.
    pub fn with_options(options: JpegOptions) -> Self {
        Self { options }
    }
}

impl ImageReader for JpegCodec {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
        let pixels = decoder.decode().map_err(IoError::decode)?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::Decode("missing JPEG info".into()))?;

        let width = info.width as usize;
        let height = info.height as usize;

        let buffer = match info.pixel_format {
            jpeg_decoder::PixelFormat::L8 => PixelBuffer::from_u8(height, width, 1, &pixels)?,
            jpeg_decoder::PixelFormat::RGB24 => PixelBuffer::from_u8(height, width, 3, &pixels)?,
            jpeg_decoder::PixelFormat::CMYK32 => {
                let rgb: Vec<u8> = pixels.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
                PixelBuffer::from_u8(height, width, 3, &rgb)?
            }
            jpeg_decoder::PixelFormat::L16 => {
                let gray: Vec<u16> = pixels
                    .chunks_exact(2)
                    .map(|b| u16::from_be_bytes([b[0], b[1]]))
                    .collect();
                PixelBuffer::from_u16(height, width, 1, &gray)?
            }
        };
        Ok(buffer)
    }
}

impl ImageWriter for JpegCodec {
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let width = u16::try_from(image.width())
            .map_err(|_| IoError::Encode(format!("width {} exceeds JPEG limit", image.width())))?;
        let height = u16::try_from(image.height())
            .map_err(|_| IoError::Encode(format!("height {} exceeds JPEG limit", image.height())))?;

        let samples = image.to_u8();
        let (color_type, pixels): (ColorType, Vec<u8>) = match image.channels() {
            1 => (ColorType::Luma, samples),
            2 => (ColorType::Luma, samples.chunks_exact(2).map(|ga| ga[0]).collect()),
            3 => (ColorType::Rgb, samples),
            4 => (
                ColorType::Rgb,
                samples
                    .chunks_exact(4)
                    .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                    .collect(),
            ),
            n => return Err(IoError::Encode(format!("unsupported channel count: {n}"))),
        };

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, self.options.quality);
        encoder
            .encode(&pixels, width, height, color_type)
            .map_err(IoError::encode)?;
        Ok(buffer)
    }
}

/// Naive CMYK to RGB, no color management.
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 1.0 - cmyk[3] as f32 / 255.0;
    let channel = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0).round() as u8;
    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
}

/// Reads a JPEG file with default options.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    JpegCodec::new().read(path)
}

/// Writes a JPEG file with default options (quality 90).
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    JpegCodec::new().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiboost_core::Domain;

    #[test]
    fn test_roundtrip_rgb() {
        let data: Vec<u8> = (0..32 * 32)
            .flat_map(|i| [(i % 32 * 8) as u8, (i / 32 * 8) as u8, 128])
            .collect();
        let image = PixelBuffer::from_u8(32, 32, 3, &data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.jpg");
        write(&path, &image).expect("Write failed");
        let loaded = read(&path).expect("Read failed");

        assert_eq!(loaded.shape(), (32, 32, 3));
        assert_eq!(loaded.domain(), Domain::U8);
    }

    #[test]
    fn test_gray_stays_single_channel() {
        let image = PixelBuffer::filled(16, 24, 1, Domain::U8, 100.0).unwrap();
        let codec = JpegCodec::new();
        let loaded = codec
            .read_from_memory(&codec.write_to_memory(&image).unwrap())
            .unwrap();
        assert_eq!(loaded.shape(), (16, 24, 1));
        // Flat image survives lossy coding almost exactly
        for &v in loaded.data() {
            assert!((v - 100.0).abs() <= 2.0, "got {v}");
        }
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let image = PixelBuffer::filled(8, 8, 4, Domain::U8, 200.0).unwrap();
        let codec = JpegCodec::new();
        let loaded = codec
            .read_from_memory(&codec.write_to_memory(&image).unwrap())
            .unwrap();
        assert_eq!(loaded.channels(), 3);
    }

    #[test]
    fn test_quality_options() {
        let data: Vec<u8> = (0..64 * 64 * 3).map(|i| (i * 31 % 256) as u8).collect();
        let image = PixelBuffer::from_u8(64, 64, 3, &data).unwrap();

        let low = JpegCodec::with_options(JpegOptions { quality: 30 })
            .write_to_memory(&image)
            .unwrap();
        let high = JpegCodec::with_options(JpegOptions { quality: 99 })
            .write_to_memory(&image)
            .unwrap();
        assert!(high.len() >= low.len());
    }

    #[test]
    fn test_cmyk_conversion() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0]), [255, 255, 255]);
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 255]), [0, 0, 0]);
        assert_eq!(cmyk_to_rgb(&[255, 0, 0, 0]), [0, 255, 255]);
    }

    #[test]
    fn test_truncated_input() {
        let err = JpegCodec::new().read_from_memory(&[0xFF, 0xD8, 0xFF]).unwrap_err();
        assert!(matches!(err, IoError::Decode(_)));
    }
}
