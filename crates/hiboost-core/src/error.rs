//! Error types for hiboost-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers failures while constructing, addressing or
//! converting a [`PixelBuffer`](crate::PixelBuffer):
//! - Bounds checks on `(row, col, channel)` access
//! - Buffer construction from raw samples
//! - Domain conversions that have no meaningful target range
//!
//! # Usage
//!
//! ```rust
//! use hiboost_core::{Error, Result};
//!
//! fn check(row: usize, col: usize, height: usize, width: usize) -> Result<()> {
//!     if row >= height || col >= width {
//!         return Err(Error::out_of_bounds(row, col, 0, height, width, 1));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or converting pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample coordinates are outside buffer bounds.
    #[error("sample ({row}, {col}, ch {channel}) out of bounds for buffer {height}x{width}x{channels}")]
    OutOfBounds {
        /// Row that was accessed
        row: usize,
        /// Column that was accessed
        col: usize,
        /// Channel that was accessed
        channel: usize,
        /// Buffer height
        height: usize,
        /// Buffer width
        width: usize,
        /// Buffer channel count
        channels: usize,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when the channel count is zero, the sample vector length does
    /// not match `height * width * channels`, or the size overflows.
    #[error("invalid dimensions: {height}x{width}x{channels} ({reason})")]
    InvalidDimensions {
        /// Requested height
        height: usize,
        /// Requested width
        width: usize,
        /// Requested channel count
        channels: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// The requested conversion needs a bounded domain.
    #[error("unsupported domain for {op}: {domain}")]
    UnsupportedDomain {
        /// Operation name
        op: &'static str,
        /// Domain name
        domain: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(
        row: usize,
        col: usize,
        channel: usize,
        height: usize,
        width: usize,
        channels: usize,
    ) -> Self {
        Self::OutOfBounds {
            row,
            col,
            channel,
            height,
            width,
            channels,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(
        height: usize,
        width: usize,
        channels: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            height,
            width,
            channels,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedDomain`] error.
    #[inline]
    pub fn unsupported_domain(op: &'static str, domain: impl std::fmt::Display) -> Self {
        Self::UnsupportedDomain {
            op,
            domain: domain.to_string(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
