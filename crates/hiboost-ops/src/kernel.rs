//! Smoothing kernels.
//!
//! Three variants, selected by [`KernelKind`]:
//!
//! - [`Kernel::box_filter`] - uniform average over a square window
//! - [`Kernel::gaussian`] - Gaussian weights, normalized to sum 1
//! - [`Kernel::disk_mean`] - average over a discretized disk footprint
//!
//! The disk-mean variant is the order-statistic "local mean" filter. It is
//! expressed as an ordinary weight grid: `1/count` inside the disk, `0`
//! outside. Box and disk-mean therefore run through the same convolution
//! path and share its boundary and rounding behavior.
//!
//! # Example
//!
//! ```rust
//! use hiboost_ops::kernel::{Kernel, KernelKind, SmoothingConfig};
//!
//! let cfg = SmoothingConfig::new(KernelKind::Gaussian, 5).with_sigma(1.0);
//! let k = Kernel::from_config(&cfg).unwrap();
//! assert_eq!(k.width, 5);
//! assert!(k.factors().is_some());
//! ```

use crate::{OpsError, OpsResult};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Closed set of supported kernel shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum KernelKind {
    /// Uniform square window.
    #[default]
    Box,
    /// Gaussian weights parametrized by sigma.
    Gaussian,
    /// Uniform weights over a disk footprint.
    DiskMean,
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Box => "box",
            Self::Gaussian => "gaussian",
            Self::DiskMean => "disk-mean",
        })
    }
}

impl FromStr for KernelKind {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "box" | "mean-box" | "average" => Ok(Self::Box),
            "gaussian" | "gauss" => Ok(Self::Gaussian),
            "disk-mean" | "disk" | "mean" | "rank-mean" => Ok(Self::DiskMean),
            other => Err(OpsError::config(format!("unsupported kernel kind '{other}'"))),
        }
    }
}

/// Parameters selecting and sizing a smoothing kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct SmoothingConfig {
    /// Kernel shape.
    #[cfg_attr(feature = "serde", serde(alias = "kernel"))]
    pub kind: KernelKind,
    /// Side length; must be odd and positive.
    pub size: usize,
    /// Gaussian standard deviation. Ignored for other kinds.
    pub sigma: Option<f32>,
}

impl SmoothingConfig {
    /// Creates a config without sigma.
    pub fn new(kind: KernelKind, size: usize) -> Self {
        Self { kind, size, sigma: None }
    }

    /// Sets the Gaussian sigma.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = Some(sigma);
        self
    }

    /// Sigma derived from the kernel size when none is given.
    ///
    /// Same rule OpenCV uses for `ksize`-only Gaussian blurs.
    pub fn default_sigma(size: usize) -> f32 {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Checks size and sigma without building the kernel.
    pub fn validate(&self) -> OpsResult<()> {
        validate_size(self.size)?;
        if self.kind == KernelKind::Gaussian {
            let sigma = self.sigma.ok_or_else(|| {
                OpsError::config("gaussian kernel requires sigma")
            })?;
            validate_sigma(sigma)?;
        }
        Ok(())
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self::new(KernelKind::Box, 5)
    }
}

fn validate_size(size: usize) -> OpsResult<()> {
    if size == 0 {
        return Err(OpsError::config("kernel size must be > 0"));
    }
    if size % 2 == 0 {
        return Err(OpsError::config(format!(
            "kernel size {size} must be odd (no unambiguous center)"
        )));
    }
    Ok(())
}

/// Scales `weights` to sum 1, rejecting a zero or non-finite total.
fn normalized(weights: &[f64]) -> OpsResult<Vec<f32>> {
    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(OpsError::config(format!("kernel weights sum to {sum}")));
    }
    Ok(weights.iter().map(|&w| (w / sum) as f32).collect())
}

fn validate_sigma(sigma: f32) -> OpsResult<()> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(OpsError::config(format!("sigma must be finite and > 0, got {sigma}")));
    }
    Ok(())
}

/// Convolution kernel.
///
/// Weights are stored row-major. Box, Gaussian and disk-mean kernels sum
/// to 1.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Kernel weights.
    pub data: Vec<f32>,
    /// Kernel width (odd).
    pub width: usize,
    /// Kernel height (odd).
    pub height: usize,
    /// Which factory built this kernel.
    pub kind: KernelKind,
    /// 1D `(row, column)` factors when the kernel is separable.
    separable: Option<(Vec<f32>, Vec<f32>)>,
}

impl Kernel {
    /// Builds the kernel selected by `config`.
    pub fn from_config(config: &SmoothingConfig) -> OpsResult<Self> {
        config.validate()?;
        let kernel = match config.kind {
            KernelKind::Box => Self::box_filter(config.size),
            KernelKind::Gaussian => {
                Self::gaussian(config.size, config.sigma.unwrap_or_default())
            }
            KernelKind::DiskMean => Self::disk_mean(config.size),
        }?;
        debug!(kind = %kernel.kind, size = kernel.width, "built kernel");
        Ok(kernel)
    }

    /// Creates a box kernel: every weight is `1 / size²`.
    ///
    /// ```rust
    /// use hiboost_ops::kernel::Kernel;
    ///
    /// let k = Kernel::box_filter(3).unwrap();
    /// assert_eq!(k.data.len(), 9);
    /// assert!(Kernel::box_filter(4).is_err());
    /// ```
    pub fn box_filter(size: usize) -> OpsResult<Self> {
        validate_size(size)?;
        let count = size * size;
        let line = vec![1.0 / size as f32; size];
        Ok(Self {
            data: vec![1.0 / count as f32; count],
            width: size,
            height: size,
            kind: KernelKind::Box,
            separable: Some((line.clone(), line)),
        })
    }

    /// Creates a Gaussian kernel.
    ///
    /// `w(x, y) ∝ exp(-(x² + y²) / 2σ²)` for integer offsets from the center,
    /// normalized so the weights sum to 1. Weights are evaluated in `f64`, so
    /// any finite positive `f32` sigma yields a finite kernel; a vanishing
    /// sigma degenerates to the identity.
    ///
    /// # Arguments
    ///
    /// * `size` - Kernel side (odd)
    /// * `sigma` - Standard deviation (> 0)
    pub fn gaussian(size: usize, sigma: f32) -> OpsResult<Self> {
        validate_size(size)?;
        validate_sigma(sigma)?;
        let half = (size / 2) as i32;
        let sigma = f64::from(sigma);
        let sigma2 = 2.0 * sigma * sigma;

        let raw: Vec<f64> = (-half..=half)
            .flat_map(|y| (-half..=half).map(move |x| f64::from(x * x + y * y)))
            .map(|d| (-d / sigma2).exp())
            .collect();
        let data = normalized(&raw)?;

        // exp(-(x²+y²)/2σ²) = exp(-x²/2σ²) * exp(-y²/2σ²)
        let raw_line: Vec<f64> = (-half..=half)
            .map(|x| (-f64::from(x * x) / sigma2).exp())
            .collect();
        let line = normalized(&raw_line)?;

        Ok(Self {
            data,
            width: size,
            height: size,
            kind: KernelKind::Gaussian,
            separable: Some((line.clone(), line)),
        })
    }

    /// Creates a disk-footprint mean kernel.
    ///
    /// Radius is `size / 2`; offsets with `x² + y² <= r²` are active and
    /// share weight `1 / count`.
    ///
    /// ```rust
    /// use hiboost_ops::kernel::Kernel;
    ///
    /// let k = Kernel::disk_mean(5).unwrap();
    /// assert_eq!(k.footprint().len(), 13);
    /// ```
    pub fn disk_mean(size: usize) -> OpsResult<Self> {
        validate_size(size)?;
        let r = (size / 2) as i32;
        let mask: Vec<bool> = (-r..=r)
            .flat_map(|y| (-r..=r).map(move |x| x * x + y * y <= r * r))
            .collect();
        let count = mask.iter().filter(|&&m| m).count();
        let weight = 1.0 / count as f32;
        let data = mask
            .into_iter()
            .map(|active| if active { weight } else { 0.0 })
            .collect();
        Ok(Self {
            data,
            width: size,
            height: size,
            kind: KernelKind::DiskMean,
            separable: None,
        })
    }

    /// Returns the kernel radius as `(rx, ry)`.
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Weight at kernel coordinates.
    #[inline]
    pub fn weight(&self, ky: usize, kx: usize) -> f32 {
        self.data[ky * self.width + kx]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Active offsets `(dy, dx)` relative to the center, row-major.
    pub fn footprint(&self) -> Vec<(isize, isize)> {
        let (rx, ry) = self.radius();
        (0..self.height)
            .flat_map(|ky| (0..self.width).map(move |kx| (ky, kx)))
            .filter(|&(ky, kx)| self.weight(ky, kx) != 0.0)
            .map(|(ky, kx)| (ky as isize - ry as isize, kx as isize - rx as isize))
            .collect()
    }

    /// 1D `(row, column)` factors if the kernel is separable.
    ///
    /// The row factor runs along x (length `width`), the column factor along
    /// y (length `height`).
    #[inline]
    pub fn factors(&self) -> Option<(&[f32], &[f32])> {
        self.separable
            .as_ref()
            .map(|(row, col)| (row.as_slice(), col.as_slice()))
    }
}
