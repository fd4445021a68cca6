//! Convolution engine.
//!
//! Applies a [`Kernel`] to a padded copy of the input and writes into a
//! freshly allocated buffer of identical dimensions. Output samples never
//! feed back into the computation.
//!
//! - [`convolve`] - picks the fastest exact path for the kernel
//! - [`convolve_direct`] - full 2D window sum, O(H·W·k²)
//! - [`convolve_separable`] - two 1D passes, O(H·W·k), for box and Gaussian
//! - [`smooth`] - builds the kernel from a [`SmoothingConfig`] and convolves
//!
//! Channels are convolved independently with the same kernel. Results are
//! accumulated in `f32` and returned in [`Domain::Float`]; quantization is
//! left to [`normalize`](crate::mask::normalize).
//!
//! # Example
//!
//! ```rust
//! use hiboost_core::{Domain, PixelBuffer};
//! use hiboost_ops::filter::convolve;
//! use hiboost_ops::kernel::Kernel;
//! use hiboost_ops::padding::BoundaryMode;
//!
//! let src = PixelBuffer::filled(16, 16, 3, Domain::Unit, 0.5).unwrap();
//! let kernel = Kernel::gaussian(3, 1.0).unwrap();
//! let blurred = convolve(&src, &kernel, BoundaryMode::Clamp).unwrap();
//! assert_eq!(blurred.shape(), src.shape());
//! ```

use crate::error::ensure_not_empty;
use crate::kernel::{Kernel, SmoothingConfig};
use crate::padding::{pad_for_kernel, BoundaryMode};
use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use hiboost_core::{Domain, PixelBuffer};
use tracing::trace;

/// Convolves `src` with `kernel`, using the separable path when available.
///
/// Both paths agree within floating-point tolerance.
pub fn convolve(src: &PixelBuffer, kernel: &Kernel, mode: BoundaryMode) -> OpsResult<PixelBuffer> {
    if kernel.factors().is_some() {
        convolve_separable(src, kernel, mode)
    } else {
        convolve_direct(src, kernel, mode)
    }
}

/// Builds the kernel described by `config` and convolves `src` with it.
pub fn smooth(
    src: &PixelBuffer,
    config: &SmoothingConfig,
    mode: BoundaryMode,
) -> OpsResult<PixelBuffer> {
    let kernel = Kernel::from_config(config)?;
    convolve(src, &kernel, mode)
}

/// Direct 2D convolution.
///
/// Each output sample is `Σ weight(ky, kx) · padded(y + ky, x + kx)`.
/// Zero weights (outside a disk footprint) are skipped.
pub fn convolve_direct(
    src: &PixelBuffer,
    kernel: &Kernel,
    mode: BoundaryMode,
) -> OpsResult<PixelBuffer> {
    ensure_not_empty("convolve", src)?;
    let (h, w, c) = src.shape();
    trace!(h, w, c, kernel_w = kernel.width, kernel_h = kernel.height, %mode, "convolve_direct");

    let padded = pad_for_kernel(src, kernel, mode)?;
    let mut dst = vec![0.0f32; h * w * c];

    for_each_row(&mut dst, w * c, |y, row| {
        for ky in 0..kernel.height {
            let prow = padded.row(y + ky);
            for kx in 0..kernel.width {
                let weight = kernel.weight(ky, kx);
                if weight == 0.0 {
                    continue;
                }
                let window = &prow[kx * c..(kx + w) * c];
                for (d, s) in row.iter_mut().zip(window) {
                    *d += s * weight;
                }
            }
        }
    });

    Ok(PixelBuffer::from_data(h, w, c, Domain::Float, dst)?)
}

/// Separable convolution: a horizontal pass over every padded row, then a
/// vertical pass over the intermediate.
///
/// # Errors
///
/// Returns [`OpsError::Config`] if the kernel has no 1D factors.
pub fn convolve_separable(
    src: &PixelBuffer,
    kernel: &Kernel,
    mode: BoundaryMode,
) -> OpsResult<PixelBuffer> {
    let (row_f, col_f) = kernel.factors().ok_or_else(|| {
        OpsError::config(format!("{} kernel is not separable", kernel.kind))
    })?;
    ensure_not_empty("convolve", src)?;
    let (h, w, c) = src.shape();
    trace!(h, w, c, size = kernel.width, %mode, "convolve_separable");

    let padded = pad_for_kernel(src, kernel, mode)?;
    let ph = padded.height();

    // Horizontal: ph x w
    let mut temp = vec![0.0f32; ph * w * c];
    for_each_row(&mut temp, w * c, |y, row| {
        let prow = padded.row(y);
        for (kx, &weight) in row_f.iter().enumerate() {
            let window = &prow[kx * c..(kx + w) * c];
            for (d, s) in row.iter_mut().zip(window) {
                *d += s * weight;
            }
        }
    });

    // Vertical: h x w
    let row_len = w * c;
    let mut dst = vec![0.0f32; h * row_len];
    for_each_row(&mut dst, row_len, |y, row| {
        for (ky, &weight) in col_f.iter().enumerate() {
            let start = (y + ky) * row_len;
            let trow = &temp[start..start + row_len];
            for (d, s) in row.iter_mut().zip(trow) {
                *d += s * weight;
            }
        }
    });

    Ok(PixelBuffer::from_data(h, w, c, Domain::Float, dst)?)
}
