//! Sharpen configuration: YAML file merged with command-line flags.

use crate::SharpenArgs;
use anyhow::{bail, Context, Result};
use hiboost_core::Domain;
use hiboost_ops::{BoundaryMode, KernelKind, SharpenConfig, SmoothingConfig};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Loads a [`SharpenConfig`] from a YAML file.
pub fn load(path: &Path) -> Result<SharpenConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Builds the effective configuration: file (if any), then flags on top.
///
/// A Gaussian kernel without sigma gets the size-derived default.
pub fn resolve(args: &SharpenArgs) -> Result<SharpenConfig> {
    let mut config = match &args.config {
        Some(path) => load(path)?,
        None => SharpenConfig::default(),
    };

    if let Some(kind) = &args.kernel {
        config.smoothing.kind = kind.parse::<KernelKind>()?;
    }
    if let Some(size) = args.size {
        config.smoothing.size = size;
    }
    if let Some(sigma) = args.sigma {
        config.smoothing.sigma = Some(sigma);
    }
    if !args.gains.is_empty() {
        config.gains = args.gains.clone();
    }
    if let Some(domain) = &args.domain {
        config.output_domain = domain.parse::<Domain>()?;
    }
    if let Some(boundary) = &args.boundary {
        config.boundary = boundary.parse::<BoundaryMode>()?;
    }

    fill_default_sigma(&mut config.smoothing);
    reject_duplicate_gains(&config.gains)?;
    debug!(?config, "resolved sharpen config");
    Ok(config)
}

/// Each gain names its own `_k<gain>` output, so two equal gains would
/// overwrite each other.
fn reject_duplicate_gains(gains: &[f32]) -> Result<()> {
    let mut seen = HashSet::new();
    for gain in gains {
        if !seen.insert(gain.to_string()) {
            bail!("Duplicate gain {gain}: each gain writes its own output file");
        }
    }
    Ok(())
}

/// Sets the conventional sigma on Gaussian configs that lack one.
pub fn fill_default_sigma(smoothing: &mut SmoothingConfig) {
    if smoothing.kind == KernelKind::Gaussian && smoothing.sigma.is_none() {
        smoothing.sigma = Some(SmoothingConfig::default_sigma(smoothing.size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> SharpenArgs {
        SharpenArgs {
            input: PathBuf::from("in.png"),
            output: PathBuf::from("out.png"),
            config: None,
            kernel: None,
            size: None,
            sigma: None,
            gains: Vec::new(),
            domain: None,
            boundary: None,
            gray: false,
            stretch_input: false,
            save_intermediates: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&args()).unwrap();
        assert_eq!(config, SharpenConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sharpen.yaml");
        std::fs::write(
            &path,
            "kernel: disk-mean\nsize: 9\ngains: [2.0]\noutput-domain: unit\nboundary: clamp\n",
        )
        .unwrap();

        let mut a = args();
        a.config = Some(path);
        a.size = Some(3);
        a.gains = vec![1.0, 4.5];
        let config = resolve(&a).unwrap();

        assert_eq!(config.smoothing.kind, KernelKind::DiskMean);
        assert_eq!(config.smoothing.size, 3);
        assert_eq!(config.gains, vec![1.0, 4.5]);
        assert_eq!(config.output_domain, Domain::Unit);
        assert_eq!(config.boundary, BoundaryMode::Clamp);
    }

    #[test]
    fn test_gaussian_default_sigma() {
        let mut a = args();
        a.kernel = Some("gaussian".into());
        a.size = Some(5);
        let config = resolve(&a).unwrap();
        let sigma = config.smoothing.sigma.unwrap();
        assert!((sigma - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_gains_rejected() {
        let mut a = args();
        a.gains = vec![2.0, 1.0, 2.0];
        let err = resolve(&a).unwrap_err();
        assert!(err.to_string().contains("Duplicate gain 2"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.yaml");
        std::fs::write(&path, "gains: [1.5, 1.5]\n").unwrap();
        let mut a = args();
        a.config = Some(path);
        assert!(resolve(&a).is_err());

        let mut a = args();
        a.gains = vec![1.0, 1.5, 2.0];
        assert_eq!(resolve(&a).unwrap().gains, vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_bad_values() {
        let mut a = args();
        a.kernel = Some("median".into());
        assert!(resolve(&a).is_err());

        let mut a = args();
        a.boundary = Some("wrap".into());
        assert!(resolve(&a).is_err());

        let mut a = args();
        a.config = Some(PathBuf::from("/nonexistent/sharpen.yaml"));
        assert!(resolve(&a).is_err());
    }
}
