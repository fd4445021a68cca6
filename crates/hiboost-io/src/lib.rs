//! # hiboost-io
//!
//! Image I/O for the sharpening tools.
//!
//! Decodes files into [`PixelBuffer`]s and encodes them back:
//!
//! - **PNG** - Lossless, 8/16-bit, alpha
//! - **JPEG** - Lossy, 8-bit
//! - **TIFF** - LZW, 8/16-bit integer, 32-bit float on read
//!
//! Integer files keep their native scale ([`Domain::U8`] or
//! [`Domain::U16`]); float TIFFs load as [`Domain::Unit`].
//!
//! # Architecture
//!
//! - [`ImageReader`] - Trait for format readers
//! - [`ImageWriter`] - Trait for format writers
//! - [`read`] / [`write`] - High-level functions with format auto-detection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hiboost_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.tif", &image)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)
//! - `tiff` - TIFF support (default)
//!
//! [`Domain::U8`]: hiboost_core::Domain::U8
//! [`Domain::U16`]: hiboost_core::Domain::U16
//! [`Domain::Unit`]: hiboost_core::Domain::Unit

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "tiff")]
pub mod tiff;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};

use hiboost_core::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, then by extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "reading image");

    let image = match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path)?,

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::read(path)?,

        _ => return Err(unsupported(path)),
    };
    debug!(shape = ?image.shape(), domain = %image.domain(), "decoded");
    Ok(image)
}

/// Decodes an in-memory image, detecting the format from magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<PixelBuffer> {
    match Format::from_bytes(data) {
        #[cfg(feature = "png")]
        Format::Png => png::PngCodec.read_from_memory(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegCodec::new().read_from_memory(data),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::TiffCodec.read_from_memory(data),

        _ => Err(IoError::UnsupportedFormat("unrecognized magic bytes".into())),
    }
}

/// Writes an image to a file, detecting format from extension.
///
/// PNG and TIFF are written at 16 bits when the buffer domain is
/// `U16`, 8 bits otherwise. Samples are clipped into the written range.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created
/// - The extension names no supported format
/// - The channel count doesn't fit the format
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), ?format, shape = ?image.shape(), "writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::write(path, image),

        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}
