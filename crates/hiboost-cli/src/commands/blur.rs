//! Blur command
//!
//! Runs only the smoothing stage and writes the result in the input's
//! domain.

use crate::BlurArgs;
use anyhow::{Context, Result};
use hiboost_ops::{normalize, smooth, BoundaryMode, KernelKind, SmoothingConfig};
use tracing::{info, trace};

pub fn run(args: BlurArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), kernel = %args.kernel, size = args.size, "blur::run");

    let mut smoothing = SmoothingConfig::new(args.kernel.parse::<KernelKind>()?, args.size);
    smoothing.sigma = args.sigma;
    crate::config::fill_default_sigma(&mut smoothing);
    let boundary = args.boundary.parse::<BoundaryMode>()?;

    let image = super::prepare_input(
        super::load_image(&args.input)?,
        args.gray,
        args.stretch_input,
    )?;
    let domain = super::writable_domain(image.domain());

    info!(kernel = %smoothing.kind, size = smoothing.size, %boundary, "Applying blur");
    if verbose > 0 {
        println!(
            "Applying {} blur (size={}) to {}",
            smoothing.kind,
            smoothing.size,
            args.input.display()
        );
    }

    let blurred = smooth(&image, &smoothing, boundary)
        .with_context(|| format!("Failed to blur: {}", args.input.display()))?;
    let output = normalize(&blurred, domain)?;

    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
