//! Boundary padding.
//!
//! Builds a [`PaddedBuffer`]: a copy of the input extended by `pad_h` rows
//! above and below and `pad_w` columns left and right. The interior is an
//! exact copy of the input; the border is filled according to
//! [`BoundaryMode`]:
//!
//! ```text
//! Zero:     0 0 | a b c | 0 0
//! Clamp:    a a | a b c | c c
//! Reflect:  c b | a b c | b a
//! ```
//!
//! Zero-fill is the canonical mode for smoothing. It makes border pixels
//! average in zeros, so smoothed borders come out slightly darker.

use crate::error::ensure_not_empty;
use crate::kernel::Kernel;
use crate::{OpsError, OpsResult};
use hiboost_core::PixelBuffer;
use std::fmt;
use std::str::FromStr;

/// How samples beyond the buffer edge are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BoundaryMode {
    /// Out-of-bounds samples are 0.
    #[default]
    Zero,
    /// Out-of-bounds samples repeat the nearest edge sample.
    Clamp,
    /// Out-of-bounds samples mirror the interior, excluding the edge sample.
    Reflect,
}

impl BoundaryMode {
    /// Maps a possibly out-of-range index onto `0..len`.
    ///
    /// Returns `None` when the sample is implicitly zero.
    #[inline]
    pub fn resolve(self, i: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        match self {
            Self::Zero => None,
            Self::Clamp => Some(i.clamp(0, n - 1) as usize),
            Self::Reflect => {
                if len == 1 {
                    return Some(0);
                }
                let period = 2 * (n - 1);
                let m = i.rem_euclid(period);
                Some(if m >= n { period - m } else { m } as usize)
            }
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zero => "zero",
            Self::Clamp => "clamp",
            Self::Reflect => "reflect",
        })
    }
}

impl FromStr for BoundaryMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" | "constant" | "black" => Ok(Self::Zero),
            "clamp" | "edge" | "nearest" => Ok(Self::Clamp),
            "reflect" | "mirror" => Ok(Self::Reflect),
            other => Err(OpsError::config(format!("unknown boundary mode '{other}'"))),
        }
    }
}

/// A buffer extended on every side, consumed by one convolution.
#[derive(Debug, Clone)]
pub struct PaddedBuffer {
    data: Vec<f32>,
    height: usize,
    width: usize,
    channels: usize,
    pad_h: usize,
    pad_w: usize,
}

impl PaddedBuffer {
    /// Padded height (`inner_height + 2 * pad_h`).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Padded width (`inner_width + 2 * pad_w`).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Padding as `(pad_h, pad_w)`.
    #[inline]
    pub fn padding(&self) -> (usize, usize) {
        (self.pad_h, self.pad_w)
    }

    /// Height of the original buffer.
    #[inline]
    pub fn inner_height(&self) -> usize {
        self.height - 2 * self.pad_h
    }

    /// Width of the original buffer.
    #[inline]
    pub fn inner_width(&self) -> usize {
        self.width - 2 * self.pad_w
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Samples of padded row `row`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        let len = self.width * self.channels;
        &self.data[row * len..(row + 1) * len]
    }

    /// Sample at padded coordinates.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> f32 {
        self.data[(row * self.width + col) * self.channels + channel]
    }
}

/// Pads `src` by `pad_h` rows and `pad_w` columns on each side.
///
/// # Example
///
/// ```rust
/// use hiboost_core::{Domain, PixelBuffer};
/// use hiboost_ops::padding::{pad, BoundaryMode};
///
/// let src = PixelBuffer::filled(2, 2, 1, Domain::U8, 9.0).unwrap();
/// let padded = pad(&src, 1, 1, BoundaryMode::Zero).unwrap();
/// assert_eq!((padded.height(), padded.width()), (4, 4));
/// assert_eq!(padded.get(0, 0, 0), 0.0);
/// assert_eq!(padded.get(1, 1, 0), 9.0);
/// ```
pub fn pad(
    src: &PixelBuffer,
    pad_h: usize,
    pad_w: usize,
    mode: BoundaryMode,
) -> OpsResult<PaddedBuffer> {
    ensure_not_empty("pad", src)?;
    let (h, w, c) = src.shape();
    let ph = h + 2 * pad_h;
    let pw = w + 2 * pad_w;

    let cols: Vec<Option<usize>> = (0..pw)
        .map(|pc| mode.resolve(pc as isize - pad_w as isize, w))
        .collect();

    let mut data = vec![0.0f32; ph * pw * c];
    for (pr, dst_row) in data.chunks_exact_mut(pw * c).enumerate() {
        let Some(sr) = mode.resolve(pr as isize - pad_h as isize, h) else {
            continue;
        };
        let src_row = src.row(sr);
        dst_row[pad_w * c..(pad_w + w) * c].copy_from_slice(src_row);
        for (pc, sc) in cols.iter().enumerate() {
            if (pad_w..pad_w + w).contains(&pc) {
                continue;
            }
            if let Some(sc) = *sc {
                dst_row[pc * c..(pc + 1) * c].copy_from_slice(&src_row[sc * c..(sc + 1) * c]);
            }
        }
    }

    Ok(PaddedBuffer {
        data,
        height: ph,
        width: pw,
        channels: c,
        pad_h,
        pad_w,
    })
}

/// Pads `src` by the radius of `kernel`: `((height - 1) / 2, (width - 1) / 2)`.
pub fn pad_for_kernel(
    src: &PixelBuffer,
    kernel: &Kernel,
    mode: BoundaryMode,
) -> OpsResult<PaddedBuffer> {
    let (rx, ry) = kernel.radius();
    pad(src, ry, rx, mode)
}
