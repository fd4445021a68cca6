//! Detail mask and high-boost compositing.
//!
//! ```text
//! mask   = original - smoothed
//! output = original + gain * mask
//! ```
//!
//! Gain 1 is classic unsharp masking, gain > 1 is high-boost filtering and
//! gain 0 returns the original. Results stay unclipped in [`Domain::Float`]
//! until [`normalize`] saturates them into an output domain.

use crate::error::{ensure_not_empty, ensure_same_shape};
use crate::parallel::{map, zip_map};
use crate::{OpsError, OpsResult};
use hiboost_core::{Domain, PixelBuffer};
use tracing::trace;

/// Computes `original - smoothed` elementwise.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if the buffers differ in height, width or
/// channel count.
///
/// # Example
///
/// ```rust
/// use hiboost_core::{Domain, PixelBuffer};
/// use hiboost_ops::mask::compute_mask;
///
/// let a = PixelBuffer::filled(2, 2, 1, Domain::U8, 10.0).unwrap();
/// let b = PixelBuffer::filled(2, 2, 1, Domain::Float, 4.0).unwrap();
/// let m = compute_mask(&a, &b).unwrap();
/// assert!(m.data().iter().all(|&v| v == 6.0));
/// ```
pub fn compute_mask(original: &PixelBuffer, smoothed: &PixelBuffer) -> OpsResult<PixelBuffer> {
    ensure_not_empty("compute_mask", original)?;
    ensure_same_shape("compute_mask", original, smoothed)?;
    let (h, w, c) = original.shape();
    trace!(h, w, c, "compute_mask");

    let data = zip_map(original.data(), smoothed.data(), |o, s| o - s);
    Ok(PixelBuffer::from_data(h, w, c, Domain::Float, data)?)
}

/// Computes `original + gain * mask` elementwise, unclipped.
///
/// # Errors
///
/// - [`OpsError::Config`] if `gain` is negative or not finite
/// - [`OpsError::ShapeMismatch`] if the buffers differ in shape
pub fn composite(original: &PixelBuffer, mask: &PixelBuffer, gain: f32) -> OpsResult<PixelBuffer> {
    validate_gain(gain)?;
    ensure_not_empty("composite", original)?;
    ensure_same_shape("composite", original, mask)?;
    let (h, w, c) = original.shape();
    trace!(h, w, c, gain, "composite");

    let data = zip_map(original.data(), mask.data(), |o, m| o + gain * m);
    Ok(PixelBuffer::from_data(h, w, c, Domain::Float, data)?)
}

/// Clips every sample into `target`'s range, rounding for integer domains.
///
/// Samples are taken to be on `target`'s scale already; nothing is
/// rescaled.
///
/// ```rust
/// use hiboost_core::{Domain, PixelBuffer};
/// use hiboost_ops::mask::normalize;
///
/// let raw = PixelBuffer::from_data(1, 3, 1, Domain::Float, vec![-4.0, 233.33, 300.0]).unwrap();
/// let out = normalize(&raw, Domain::U8).unwrap();
/// assert_eq!(out.data(), &[0.0, 233.0, 255.0]);
/// ```
///
/// # Errors
///
/// [`OpsError::Config`] when `target` is [`Domain::Float`].
pub fn normalize(output: &PixelBuffer, target: Domain) -> OpsResult<PixelBuffer> {
    if !target.is_bounded() {
        return Err(OpsError::config(format!(
            "output domain '{target}' has no range to normalize into"
        )));
    }
    ensure_not_empty("normalize", output)?;
    let (h, w, c) = output.shape();

    let data = map(output.data(), |v| target.clip(v));
    Ok(PixelBuffer::from_data(h, w, c, target, data)?)
}

/// Gains must be finite and non-negative.
pub(crate) fn validate_gain(gain: f32) -> OpsResult<()> {
    if !gain.is_finite() || gain < 0.0 {
        return Err(OpsError::config(format!(
            "gain must be finite and >= 0, got {gain}"
        )));
    }
    Ok(())
}
