//! Image info command.

use crate::InfoArgs;
use anyhow::Result;
use hiboost_core::PixelBuffer;
use hiboost_io::Format;
use std::fs;
use std::path::Path;

/// Runs the info command, printing dimensions, domain and optional stats.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path)?;

        print_text(path, &image, file_size, format, args.stats, verbose);

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

fn print_text(
    path: &Path,
    image: &PixelBuffer,
    file_size: u64,
    format: Format,
    stats: bool,
    verbose: u8,
) {
    println!("{}", path.display());
    println!("  Resolution: {}x{}", image.width(), image.height());
    println!("  Channels:   {}", image.channels());
    println!("  Domain:     {}", image.domain());
    println!("  File size:  {}", super::format_size(file_size));

    if verbose > 0 {
        println!("  Format:     {:?}", format);
        println!("  Pixels:     {}", image.pixel_count());
    }

    if stats {
        if let Some((min, max)) = image.min_max() {
            let mean = image.sum() / image.sample_count() as f64;
            println!("  Min value:  {:.6}", min);
            println!("  Max value:  {:.6}", max);
            println!("  Avg value:  {:.6}", mean);
        }
    }
}
