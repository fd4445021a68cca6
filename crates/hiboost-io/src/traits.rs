//! I/O traits for image readers and writers.
//!
//! Every codec decodes from and encodes to memory; the file-based methods
//! are provided on top of that.

use crate::IoResult;
use hiboost_core::PixelBuffer;
use std::path::Path;

/// Trait for image format readers.
pub trait ImageReader {
    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer>;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer> {
        let data = std::fs::read(path.as_ref())?;
        self.read_from_memory(&data)
    }
}

/// Trait for image format writers.
pub trait ImageWriter {
    /// Writes an image to memory.
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>>;

    /// Writes an image to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }
}
