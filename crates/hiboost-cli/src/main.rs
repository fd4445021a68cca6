//! hiboost - unsharp masking and high-boost sharpening from the command line

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

#[derive(Parser)]
#[command(name = "hiboost")]
#[command(author, version, about = "Unsharp masking and high-boost sharpening")]
#[command(long_about = "
Sharpens images by adding back a scaled detail mask:

    output = original + k * (original - smooth(original))

Examples:
  hiboost sharpen in.png -o out.png                         # box 5x5, k = 1
  hiboost sharpen in.png -o out.png -k gaussian -s 7 --sigma 1.5 -g 2.5
  hiboost sharpen in.tif -o out.tif -g 1 -g 2 -g 4.5       # out_k1.tif, out_k2.tif, ...
  hiboost sharpen in.jpg -o out.png --config sharpen.yaml --save-intermediates
  hiboost blur in.png -o soft.png -k disk-mean -s 9
  hiboost info in.png --stats
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sharpen by unsharp / high-boost masking
    #[command(visible_alias = "s")]
    Sharpen(SharpenArgs),

    /// Smooth only (the first stage of sharpen)
    Blur(BlurArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct SharpenArgs {
    /// Input image
    input: PathBuf,

    /// Output image; with several gains each file gets a `_k<gain>` suffix
    #[arg(short, long)]
    output: PathBuf,

    /// YAML config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Smoothing kernel: box, gaussian, disk-mean
    #[arg(short, long)]
    kernel: Option<String>,

    /// Kernel size (odd)
    #[arg(short, long)]
    size: Option<usize>,

    /// Gaussian sigma (default derived from size)
    #[arg(long)]
    sigma: Option<f32>,

    /// Mask gain; repeat or comma-separate for several outputs
    #[arg(short, long = "gain", value_delimiter = ',')]
    gains: Vec<f32>,

    /// Output domain: u8, u16, unit
    #[arg(short, long)]
    domain: Option<String>,

    /// Boundary handling: zero, clamp, reflect
    #[arg(short, long)]
    boundary: Option<String>,

    /// Convert to grayscale before filtering
    #[arg(long)]
    gray: bool,

    /// Min-max stretch the input to its full range (automatic for float
    /// sources outside [0, 1])
    #[arg(long)]
    stretch_input: bool,

    /// Also write the smoothed image and the detail mask
    #[arg(long)]
    save_intermediates: bool,
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Smoothing kernel: box, gaussian, disk-mean
    #[arg(short, long, default_value = "box")]
    kernel: String,

    /// Kernel size (odd)
    #[arg(short, long, default_value = "5")]
    size: usize,

    /// Gaussian sigma (default derived from size)
    #[arg(long)]
    sigma: Option<f32>,

    /// Boundary handling: zero, clamp, reflect
    #[arg(short, long, default_value = "zero")]
    boundary: String,

    /// Convert to grayscale before filtering
    #[arg(long)]
    gray: bool,

    /// Min-max stretch the input to its full range
    #[arg(long)]
    stretch_input: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Show sample statistics
    #[arg(short, long)]
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Sharpen(args) => commands::sharpen::run(args, cli.verbose),
        Commands::Blur(args) => commands::blur::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}
