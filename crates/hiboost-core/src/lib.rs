//! # hiboost-core
//!
//! Core types for high-boost image sharpening.
//!
//! - [`PixelBuffer`] - Row-major 2D sample grid with optional channels
//! - [`Domain`] - Explicit numeric range of a buffer's samples
//! - [`Error`] - Construction, bounds and conversion failures
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The rest of the workspace builds
//! on it:
//!
//! ```text
//! hiboost-core (this crate)
//!    ^
//!    |
//!    +-- hiboost-ops (padding, kernels, convolution, compositing, pipeline)
//!    +-- hiboost-io  (PNG / JPEG / TIFF decode and encode)
//!    +-- hiboost-cli
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/deserialize [`Domain`] (used by configuration files)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod domain;
pub mod error;

pub use buffer::{PixelBuffer, REC601_LUMA};
pub use domain::Domain;
pub use error::{Error, Result};
