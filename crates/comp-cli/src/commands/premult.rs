//! Premultiply / unpremultiply command

use crate::PremultArgs;
use anyhow::{Context, Result};
use comp_ops::alpha::{premultiply, unpremultiply};
use comp_raster::Engine;
use tracing::info;

pub fn run(args: PremultArgs, engine: &Engine) -> Result<()> {
    let image = super::load_image(&args.input)?;

    let result = if args.reverse {
        info!(policy = %args.zero_alpha, "unpremultiplying {}", args.input.display());
        unpremultiply(engine, &image, args.zero_alpha)
    } else {
        info!("premultiplying {}", args.input.display());
        premultiply(engine, &image)
    }
    .with_context(|| format!("Failed to process {}", args.input.display()))?;

    super::save_image(&args.output, &result, image.format(), engine)
}
