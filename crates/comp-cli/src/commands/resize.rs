//! Resize command

use crate::ResizeArgs;
use anyhow::{Context, Result};
use comp_ops::resize::{output_size, resize};
use comp_raster::Engine;
use tracing::info;

pub fn run(args: ResizeArgs, engine: &Engine) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let (w, h) = image.dimensions();
    let premultiply = !args.no_premultiply;

    info!(
        "Resizing {}x{} -> {:?} with {}{}",
        w,
        h,
        output_size(w, h, args.scale),
        args.kernel,
        if premultiply { " (premultiplied)" } else { "" }
    );

    let result = resize(engine, &image, args.scale, args.kernel, premultiply)
        .with_context(|| format!("Failed to resize {}", args.input.display()))?;

    super::save_image(&args.output, &result, image.format(), engine)
}
