//! Error types for sharpening operations.

use thiserror::Error;

/// `(height, width, channels)` of a buffer, for error reporting.
pub type Shape = (usize, usize, usize);

/// Error type for smoothing, compositing and pipeline operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid kernel size, sigma, kind, gain or output domain.
    ///
    /// Raised before any computation starts.
    #[error("configuration error: {0}")]
    Config(String),

    /// Two buffers that must match have different shapes.
    #[error("{op}: shape mismatch, expected {expected:?} got {actual:?} (height, width, channels)")]
    ShapeMismatch {
        /// Operation name.
        op: &'static str,
        /// Shape of the reference buffer.
        expected: Shape,
        /// Shape of the offending buffer.
        actual: Shape,
    },

    /// Input buffer has zero height or width.
    #[error("{op}: empty input ({height}x{width})")]
    EmptyInput {
        /// Operation name.
        op: &'static str,
        /// Input height.
        height: usize,
        /// Input width.
        width: usize,
    },

    /// Buffer construction or conversion failed.
    #[error(transparent)]
    Core(#[from] hiboost_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::Config`] error.
    #[inline]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns `true` for configuration errors.
    #[inline]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type for sharpening operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Fails with [`OpsError::EmptyInput`] when `buf` has zero area.
pub(crate) fn ensure_not_empty(op: &'static str, buf: &hiboost_core::PixelBuffer) -> OpsResult<()> {
    if buf.is_empty() {
        return Err(OpsError::EmptyInput {
            op,
            height: buf.height(),
            width: buf.width(),
        });
    }
    Ok(())
}

/// Fails with [`OpsError::ShapeMismatch`] unless both buffers share a shape.
pub(crate) fn ensure_same_shape(
    op: &'static str,
    expected: &hiboost_core::PixelBuffer,
    actual: &hiboost_core::PixelBuffer,
) -> OpsResult<()> {
    if !expected.same_shape(actual) {
        return Err(OpsError::ShapeMismatch {
            op,
            expected: expected.shape(),
            actual: actual.shape(),
        });
    }
    Ok(())
}
