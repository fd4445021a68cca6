//! High-boost sharpening pipeline.
//!
//! Stages run strictly in order:
//!
//! 1. Rescale the input onto the output domain's scale
//! 2. Smooth (one convolution)
//! 3. Compute the detail mask (once)
//! 4. For each gain: composite, then normalize into the output domain
//!
//! # Example
//!
//! ```rust
//! use hiboost_core::{Domain, PixelBuffer};
//! use hiboost_ops::kernel::{KernelKind, SmoothingConfig};
//! use hiboost_ops::pipeline::{FilterPipeline, SharpenConfig};
//!
//! let config = SharpenConfig::default()
//!     .with_smoothing(SmoothingConfig::new(KernelKind::Box, 3))
//!     .with_gains(vec![1.0, 2.5]);
//! let pipeline = FilterPipeline::new(config).unwrap();
//!
//! let image = PixelBuffer::filled(8, 8, 3, Domain::U8, 128.0).unwrap();
//! let out = pipeline.run(&image).unwrap();
//! assert_eq!(out.outputs.len(), 2);
//! assert_eq!(out.outputs[1].gain, 2.5);
//! ```

use crate::error::ensure_not_empty;
use crate::filter::convolve;
use crate::kernel::{Kernel, SmoothingConfig};
use crate::mask::{composite, compute_mask, normalize, validate_gain};
use crate::padding::BoundaryMode;
use crate::{OpsError, OpsResult};
use hiboost_core::{Domain, PixelBuffer};
use tracing::{debug, info};

/// Full sharpening configuration.
///
/// Deserializes from a flat kebab-case map:
///
/// ```yaml
/// kernel: gaussian
/// size: 5
/// sigma: 1.2
/// gains: [1.0, 2.5]
/// output-domain: u8
/// boundary: zero
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct SharpenConfig {
    /// Smoothing kernel selection.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub smoothing: SmoothingConfig,
    /// Boundary policy for the convolution.
    pub boundary: BoundaryMode,
    /// Mask gains, one output per gain.
    pub gains: Vec<f32>,
    /// Domain the outputs are normalized into.
    pub output_domain: Domain,
}

impl Default for SharpenConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingConfig::default(),
            boundary: BoundaryMode::Zero,
            gains: vec![1.0],
            output_domain: Domain::U8,
        }
    }
}

impl SharpenConfig {
    /// Sets the smoothing kernel.
    pub fn with_smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Sets the boundary mode.
    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Replaces the gain list.
    pub fn with_gains(mut self, gains: Vec<f32>) -> Self {
        self.gains = gains;
        self
    }

    /// Sets the output domain.
    pub fn with_output_domain(mut self, domain: Domain) -> Self {
        self.output_domain = domain;
        self
    }

    /// Validates every field.
    pub fn validate(&self) -> OpsResult<()> {
        self.smoothing.validate()?;
        if self.gains.is_empty() {
            return Err(OpsError::config("at least one gain is required"));
        }
        for &gain in &self.gains {
            validate_gain(gain)?;
        }
        if !self.output_domain.is_bounded() {
            return Err(OpsError::config(format!(
                "output domain must be bounded, got '{}'",
                self.output_domain
            )));
        }
        Ok(())
    }
}

/// One normalized output and the gain that produced it.
#[derive(Debug, Clone)]
pub struct BoostedImage {
    /// Gain applied to the mask.
    pub gain: f32,
    /// Normalized result in the output domain.
    pub image: PixelBuffer,
}

/// Everything a pipeline run produces.
#[derive(Debug, Clone)]
pub struct SharpenOutput {
    /// Smoothed input, [`Domain::Float`] on the output domain's scale.
    pub smoothed: PixelBuffer,
    /// Detail mask, [`Domain::Float`] on the output domain's scale.
    pub mask: PixelBuffer,
    /// One entry per configured gain, in configuration order.
    pub outputs: Vec<BoostedImage>,
}

impl SharpenOutput {
    /// Output images in gain order.
    pub fn images(&self) -> impl Iterator<Item = &PixelBuffer> {
        self.outputs.iter().map(|o| &o.image)
    }
}

/// A validated configuration with its kernel already built.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    config: SharpenConfig,
    kernel: Kernel,
}

impl FilterPipeline {
    /// Validates `config` and builds the kernel.
    pub fn new(config: SharpenConfig) -> OpsResult<Self> {
        config.validate()?;
        let kernel = Kernel::from_config(&config.smoothing)?;
        Ok(Self { config, kernel })
    }

    /// The configuration this pipeline was built from.
    pub fn config(&self) -> &SharpenConfig {
        &self.config
    }

    /// The smoothing kernel.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Runs smoothing, masking and compositing for every gain.
    pub fn run(&self, image: &PixelBuffer) -> OpsResult<SharpenOutput> {
        ensure_not_empty("sharpen", image)?;
        let domain = self.config.output_domain;
        info!(
            height = image.height(),
            width = image.width(),
            channels = image.channels(),
            kernel = %self.kernel.kind,
            size = self.kernel.width,
            gains = self.config.gains.len(),
            "sharpen"
        );

        let original = image.to_domain(domain);
        let smoothed = convolve(&original, &self.kernel, self.config.boundary)?;
        let mask = compute_mask(&original, &smoothed)?;

        let outputs = self
            .config
            .gains
            .iter()
            .map(|&gain| {
                let raw = composite(&original, &mask, gain)?;
                let image = normalize(&raw, domain)?;
                debug!(gain, "composited");
                Ok(BoostedImage { gain, image })
            })
            .collect::<OpsResult<Vec<_>>>()?;

        Ok(SharpenOutput { smoothed, mask, outputs })
    }
}

/// Builds a [`FilterPipeline`] from `config` and runs it once.
pub fn run(image: &PixelBuffer, config: &SharpenConfig) -> OpsResult<SharpenOutput> {
    FilterPipeline::new(config.clone())?.run(image)
}
