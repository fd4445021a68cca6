//! Pixel buffer type for high-boost processing.
//!
//! [`PixelBuffer`] owns a 2D grid of samples with an optional channel axis.
//! Dimensions are always given in `(height, width, channels)` order and all
//! samples are addressed by `(row, col, channel)`.
//!
//! # Memory Layout
//!
//! Samples are stored **row-major**, top-to-bottom, channels interleaved:
//!
//! ```text
//! Memory: [c0 c1 c2 c0 c1 c2 ...]  <- Row 0
//!         [c0 c1 c2 c0 c1 c2 ...]  <- Row 1
//!         ...
//! ```
//!
//! # Domains
//!
//! Samples are always `f32` so arithmetic never overflows or truncates. The
//! numeric range they belong to is the explicit [`Domain`] attribute, never
//! inferred from the values. Integer-domain buffers keep their native scale:
//! a `U8` sample of 200 is stored as `200.0`.
//!
//! # Usage
//!
//! ```rust
//! use hiboost_core::{Domain, PixelBuffer};
//!
//! let mut buf = PixelBuffer::new(5, 5, 1, Domain::U8).unwrap();
//! buf.set(2, 2, 0, 100.0);
//! assert_eq!(buf.get(2, 2, 0), 100.0);
//! assert_eq!(buf.shape(), (5, 5, 1));
//! ```

use crate::{Domain, Error, Result};

/// Rec.601 luma weights, as used for grayscale loading of color images.
pub const REC601_LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// Owned 2D sample grid with explicit numeric domain.
///
/// A buffer may have zero height or width (for example after a degenerate
/// decode); processing stages reject such buffers instead of producing
/// output. The channel count is always at least one.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    data: Vec<f32>,
    height: usize,
    width: usize,
    channels: usize,
    domain: Domain,
}

/// Validates dimensions and returns the total sample count.
fn sample_len(height: usize, width: usize, channels: usize) -> Result<usize> {
    if channels == 0 {
        return Err(Error::invalid_dimensions(
            height,
            width,
            channels,
            "channel count must be > 0",
        ));
    }
    height
        .checked_mul(width)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(height, width, channels, "size overflows"))
}

impl PixelBuffer {
    /// Creates a new zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `channels == 0` or the total
    /// size overflows.
    pub fn new(height: usize, width: usize, channels: usize, domain: Domain) -> Result<Self> {
        Self::filled(height, width, channels, domain, 0.0)
    }

    /// Creates a buffer with every sample set to `value`.
    pub fn filled(
        height: usize,
        width: usize,
        channels: usize,
        domain: Domain,
        value: f32,
    ) -> Result<Self> {
        let len = sample_len(height, width, channels)?;
        Ok(Self {
            data: vec![value; len],
            height,
            width,
            channels,
            domain,
        })
    }

    /// Creates a buffer from existing interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` doesn't match.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hiboost_core::{Domain, PixelBuffer};
    ///
    /// let buf = PixelBuffer::from_data(2, 3, 1, Domain::Unit, vec![0.5; 6]).unwrap();
    /// assert_eq!(buf.width(), 3);
    /// ```
    pub fn from_data(
        height: usize,
        width: usize,
        channels: usize,
        domain: Domain,
        data: Vec<f32>,
    ) -> Result<Self> {
        let expected = sample_len(height, width, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                height,
                width,
                channels,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            height,
            width,
            channels,
            domain,
        })
    }

    /// Creates a [`Domain::U8`] buffer from 8-bit samples.
    pub fn from_u8(height: usize, width: usize, channels: usize, data: &[u8]) -> Result<Self> {
        let samples = data.iter().map(|&v| v as f32).collect();
        Self::from_data(height, width, channels, Domain::U8, samples)
    }

    /// Creates a [`Domain::U16`] buffer from 16-bit samples.
    pub fn from_u16(height: usize, width: usize, channels: usize, data: &[u16]) -> Result<Self> {
        let samples = data.iter().map(|&v| v as f32).collect();
        Self::from_data(height, width, channels, Domain::U16, samples)
    }

    /// Returns the buffer height (rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the buffer width (columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns `(height, width, channels)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    /// Returns the numeric domain.
    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Returns `true` if both buffers have identical `(height, width, channels)`.
    #[inline]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// Returns the number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// Returns the number of samples (pixels * channels).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// Number of samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Returns the raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * self.channels + channel
    }

    /// Returns the sample at `(row, col, channel)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> f32 {
        debug_assert!(
            row < self.height && col < self.width && channel < self.channels,
            "sample out of bounds"
        );
        self.data[self.offset(row, col, channel)]
    }

    /// Returns the sample at `(row, col, channel)` or an error if out of bounds.
    pub fn try_get(&self, row: usize, col: usize, channel: usize) -> Result<f32> {
        if row < self.height && col < self.width && channel < self.channels {
            Ok(self.get(row, col, channel))
        } else {
            Err(Error::out_of_bounds(
                row,
                col,
                channel,
                self.height,
                self.width,
                self.channels,
            ))
        }
    }

    /// Sets the sample at `(row, col, channel)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: f32) {
        debug_assert!(
            row < self.height && col < self.width && channel < self.channels,
            "sample out of bounds"
        );
        let offset = self.offset(row, col, channel);
        self.data[offset] = value;
    }

    /// Returns one row of interleaved samples.
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        debug_assert!(row < self.height, "row out of bounds");
        let start = row * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Rescales samples from this buffer's domain scale onto `target`'s.
    ///
    /// No clipping or rounding happens here; that is the job of the output
    /// normalization stage. `Float` is read on the unit scale.
    ///
    /// ```rust
    /// use hiboost_core::{Domain, PixelBuffer};
    ///
    /// let buf = PixelBuffer::from_u8(1, 2, 1, &[0, 255]).unwrap();
    /// let unit = buf.to_domain(Domain::Unit);
    /// assert_eq!(unit.data(), &[0.0, 1.0]);
    /// ```
    pub fn to_domain(&self, target: Domain) -> Self {
        let factor = target.scale() / self.domain.scale();
        let data = if factor == 1.0 {
            self.data.clone()
        } else {
            self.data.iter().map(|&v| v * factor).collect()
        };
        Self {
            data,
            height: self.height,
            width: self.width,
            channels: self.channels,
            domain: target,
        }
    }

    /// Returns `true` if every sample lies inside the domain's range.
    ///
    /// Unbounded domains always fit.
    pub fn fits_domain(&self) -> bool {
        match self.domain.max_value() {
            Some(max) => self.data.iter().all(|&v| (0.0..=max).contains(&v)),
            None => true,
        }
    }

    /// Linearly maps the sample range `[min, max]` onto `target`'s full scale.
    ///
    /// This is the contrast stretch applied to sources whose values don't
    /// follow their nominal range (float TIFFs holding raw measurements).
    /// Integer targets are rounded. A constant buffer maps to zero.
    ///
    /// ```rust
    /// use hiboost_core::{Domain, PixelBuffer};
    ///
    /// let raw = PixelBuffer::from_data(1, 3, 1, Domain::Unit, vec![10.0, 510.0, 1010.0]).unwrap();
    /// let u8 = raw.stretch_to(Domain::U8).unwrap();
    /// assert_eq!(u8.data(), &[0.0, 128.0, 255.0]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDomain`] when `target` is unbounded.
    pub fn stretch_to(&self, target: Domain) -> Result<Self> {
        let scale = target
            .max_value()
            .ok_or_else(|| Error::unsupported_domain("stretch_to", target))?;
        let data = match self.min_max() {
            Some((lo, hi)) if hi > lo => {
                // f64 keeps hi - lo finite for any pair of finite f32 samples
                let (lo, range) = (lo as f64, hi as f64 - lo as f64);
                let factor = scale as f64 / range;
                self.data
                    .iter()
                    .map(|&v| target.clip(((v as f64 - lo) * factor) as f32))
                    .collect()
            }
            _ => vec![0.0; self.data.len()],
        };
        Ok(Self {
            data,
            height: self.height,
            width: self.width,
            channels: self.channels,
            domain: target,
        })
    }

    /// Quantizes to 8-bit samples (clip + round on the u8 scale).
    pub fn to_u8(&self) -> Vec<u8> {
        let factor = 255.0 / self.domain.scale();
        self.data
            .iter()
            .map(|&v| Domain::U8.clip(v * factor) as u8)
            .collect()
    }

    /// Quantizes to 16-bit samples (clip + round on the u16 scale).
    pub fn to_u16(&self) -> Vec<u16> {
        let factor = 65535.0 / self.domain.scale();
        self.data
            .iter()
            .map(|&v| Domain::U16.clip(v * factor) as u16)
            .collect()
    }

    /// Converts to a single-channel buffer.
    ///
    /// Three- and four-channel buffers use Rec.601 weights (alpha dropped);
    /// one- and two-channel buffers keep their first channel.
    pub fn to_luma(&self) -> Self {
        if self.channels == 1 {
            return self.clone();
        }
        let data = self
            .data
            .chunks_exact(self.channels)
            .map(|px| {
                if self.channels >= 3 {
                    REC601_LUMA[0] * px[0] + REC601_LUMA[1] * px[1] + REC601_LUMA[2] * px[2]
                } else {
                    px[0]
                }
            })
            .map(|v| if self.domain.is_integer() { v.round() } else { v })
            .collect();
        Self {
            data,
            height: self.height,
            width: self.width,
            channels: 1,
            domain: self.domain,
        }
    }

    /// Sum of all samples, accumulated in `f64`.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Minimum and maximum sample, or `None` for an empty buffer.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("channels", &self.channels)
            .field("domain", &self.domain)
            .finish()
    }
}
