//! Sharpen command
//!
//! Unsharp / high-boost masking with one output per gain. With
//! `--save-intermediates` the smoothed image and the detail mask are
//! written next to the output.

use crate::SharpenArgs;
use anyhow::{Context, Result};
use hiboost_core::{Domain, PixelBuffer};
use hiboost_ops::{normalize, FilterPipeline, SharpenOutput};
use std::path::Path;
use tracing::{info, trace};

pub fn run(args: SharpenArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "sharpen::run");

    let config = crate::config::resolve(&args)?;
    let pipeline = FilterPipeline::new(config).context("Invalid sharpen configuration")?;
    let config = pipeline.config();

    let image = super::prepare_input(
        super::load_image(&args.input)?,
        args.gray,
        args.stretch_input,
    )?;

    info!(
        kernel = %config.smoothing.kind,
        size = config.smoothing.size,
        boundary = %config.boundary,
        gains = ?config.gains,
        "Sharpening"
    );
    if verbose > 0 {
        println!(
            "Sharpening {} ({} {}x{}, {} gain(s))",
            args.input.display(),
            config.smoothing.kind,
            config.smoothing.size,
            config.smoothing.size,
            config.gains.len()
        );
    }

    let out = pipeline
        .run(&image)
        .with_context(|| format!("Failed to sharpen: {}", args.input.display()))?;

    let multi = out.outputs.len() > 1;
    for boosted in &out.outputs {
        let path = if multi {
            super::suffixed_path(&args.output, &format!("k{}", boosted.gain))
        } else {
            args.output.clone()
        };
        super::save_image(&path, &boosted.image)?;
        if verbose > 0 {
            println!("  k = {} -> {}", boosted.gain, path.display());
        }
    }

    if args.save_intermediates {
        save_intermediates(&args.output, &out, config.output_domain)?;
    }

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

fn save_intermediates(output: &Path, out: &SharpenOutput, domain: Domain) -> Result<()> {
    let smoothed_path = super::suffixed_path(output, "smoothed");
    super::save_image(&smoothed_path, &normalize(&out.smoothed, domain)?)?;

    let mask_path = super::suffixed_path(output, "mask");
    super::save_image(&mask_path, &mask_preview(&out.mask, domain)?)?;

    info!(smoothed = %smoothed_path.display(), mask = %mask_path.display(), "Wrote intermediates");
    Ok(())
}

/// Shifts the signed mask to mid-range so negative detail stays visible.
fn mask_preview(mask: &PixelBuffer, domain: Domain) -> Result<PixelBuffer> {
    let mid = domain.scale() / 2.0;
    let (h, w, c) = mask.shape();
    let shifted = mask.data().iter().map(|v| v + mid).collect();
    let shifted = PixelBuffer::from_data(h, w, c, Domain::Float, shifted)?;
    Ok(normalize(&shifted, domain)?)
}
