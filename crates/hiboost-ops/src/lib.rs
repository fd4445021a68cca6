//! # hiboost-ops
//!
//! Spatial-domain sharpening by unsharp / high-boost masking.
//!
//! An image is smoothed, a detail mask is formed by subtracting the smoothed
//! image from the original, and the mask is added back scaled by a gain:
//!
//! ```text
//! output = original + k * (original - smooth(original))
//! ```
//!
//! # Modules
//!
//! - [`padding`] - Boundary policies (zero, clamp, reflect)
//! - [`kernel`] - Box, Gaussian and disk-mean kernels
//! - [`filter`] - Direct and separable convolution
//! - [`mask`] - Detail mask, compositing and output normalization
//! - [`pipeline`] - End-to-end sharpening for one or more gains
//!
//! # Example
//!
//! ```rust
//! use hiboost_core::{Domain, PixelBuffer};
//! use hiboost_ops::{KernelKind, SharpenConfig, SmoothingConfig};
//!
//! let mut image = PixelBuffer::new(5, 5, 1, Domain::U8).unwrap();
//! image.set(2, 2, 0, 100.0);
//!
//! let config = SharpenConfig::default()
//!     .with_smoothing(SmoothingConfig::new(KernelKind::Box, 3))
//!     .with_gains(vec![1.5]);
//! let out = hiboost_ops::run(&image, &config).unwrap();
//! assert_eq!(out.outputs[0].image.get(2, 2, 0), 233.0);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - split rows across Rayon workers
//! - `serde` (default) - deserialize [`SharpenConfig`] from config files

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod kernel;
pub mod mask;
pub mod padding;
pub mod parallel;
pub mod pipeline;

pub use error::{OpsError, OpsResult, Shape};
pub use filter::{convolve, convolve_direct, convolve_separable, smooth};
pub use kernel::{Kernel, KernelKind, SmoothingConfig};
pub use mask::{composite, compute_mask, normalize};
pub use padding::{pad, pad_for_kernel, BoundaryMode, PaddedBuffer};
pub use pipeline::{run, BoostedImage, FilterPipeline, SharpenConfig, SharpenOutput};
