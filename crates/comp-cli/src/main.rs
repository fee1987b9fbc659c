//! comp - alpha compositing and image comparison CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comp_ops::ZeroAlpha;
use comp_raster::{Engine, EngineConfig, Kernel};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "comp")]
#[command(author, version, about = "Alpha compositing and image comparison")]
#[command(long_about = "
Composites, resizes and compares PNG images with correct premultiplied-alpha
handling.

Examples:
  comp composite bg.png fg.png -o out.png          # fg over bg
  comp composite bg.png mid.png top.png -o out.png # stack layers
  comp compare render.png reference.png            # MSE
  comp compare a.png b.png --metric stddev
  comp resize in.png -s 0.5 -k bicubic -o half.png
  comp premult in.png -o pre.png
  comp stats in.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Composite layers over a background (Porter-Duff over)
    #[command(visible_alias = "c")]
    Composite(CompositeArgs),

    /// Compare two images
    #[command(visible_alias = "d")]
    Compare(CompareArgs),

    /// Scale an image
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Premultiply (or unpremultiply) alpha
    Premult(PremultArgs),

    /// Print per-band statistics
    Stats(StatsArgs),
}

/// How `composite` blends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CompositeMethod {
    /// Premultiply, composite, unpremultiply
    Premultiplied,
    /// Blend in straight alpha and divide by the output alpha
    Straight,
}

/// Arguments for the `composite` command.
#[derive(Args)]
struct CompositeArgs {
    /// Background (bottom) image
    background: PathBuf,

    /// Layers to place on top, lowest first
    #[arg(required = true)]
    layers: Vec<PathBuf>,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Blend formulation
    #[arg(short, long, value_enum, default_value = "premultiplied")]
    method: CompositeMethod,
}

/// Comparison metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Metric {
    /// Mean squared error
    Mse,
    /// Standard deviation of the difference
    Stddev,
    /// MSE after premultiplying both images
    Premultiplied,
}

/// Arguments for the `compare` command.
#[derive(Args)]
struct CompareArgs {
    /// Image under test
    actual: PathBuf,

    /// Reference image
    expected: PathBuf,

    /// Metric to report
    #[arg(short, long, value_enum, default_value = "mse")]
    metric: Metric,

    /// Fail if the metric exceeds this value
    #[arg(short, long)]
    threshold: Option<f64>,
}

/// Arguments for the `resize` command.
#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Scale factor
    #[arg(short, long)]
    scale: f64,

    /// Kernel: nearest, bilinear, bicubic, lanczos3
    #[arg(short, long, default_value = "bilinear")]
    kernel: Kernel,

    /// Resample straight alpha directly
    #[arg(long)]
    no_premultiply: bool,
}

/// Arguments for the `premult` command.
#[derive(Args)]
struct PremultArgs {
    /// Input image (4 bands)
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Unpremultiply instead
    #[arg(short, long)]
    reverse: bool,

    /// Zero-alpha policy when unpremultiplying: zero, preserve, reject
    #[arg(long, default_value = "zero")]
    zero_alpha: ZeroAlpha,
}

/// Arguments for the `stats` command.
#[derive(Args)]
struct StatsArgs {
    /// Input image
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = comp_cli::logging::init(cli.verbose, cli.log_file.as_deref())
        .context("Failed to initialize logging")?;

    let engine = Engine::init(EngineConfig {
        threads: cli.threads,
    })
    .context("Failed to start raster engine")?;

    match cli.command {
        Commands::Composite(args) => commands::composite::run(args, &engine),
        Commands::Compare(args) => commands::compare::run(args, &engine),
        Commands::Resize(args) => commands::resize::run(args, &engine),
        Commands::Premult(args) => commands::premult::run(args, &engine),
        Commands::Stats(args) => commands::stats::run(args, &engine),
    }
}
