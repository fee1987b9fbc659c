//! Composite command

use crate::{CompositeArgs, CompositeMethod};
use anyhow::{Context, Result};
use comp_ops::alpha::shared_max_alpha;
use comp_ops::composite::{composite_straight_with_max, overlay_layers};
use comp_raster::Engine;
use tracing::info;

pub fn run(args: CompositeArgs, engine: &Engine) -> Result<()> {
    let background = super::load_image(&args.background)?;
    let layers = args
        .layers
        .iter()
        .map(|p| super::load_image(p))
        .collect::<Result<Vec<_>>>()?;

    info!(
        background = %args.background.display(),
        layers = layers.len(),
        method = ?args.method,
        "compositing"
    );

    let result = match args.method {
        CompositeMethod::Premultiplied => overlay_layers(engine, &background, &layers),
        CompositeMethod::Straight => {
            let max_alpha = background.format().max_alpha();
            layers.iter().try_fold(background.clone(), |acc, layer| {
                shared_max_alpha(layer.format(), background.format())?;
                composite_straight_with_max(engine, layer, &acc, max_alpha)
            })
        }
    }
    .context("Composite failed")?;

    super::save_image(&args.output, &result, background.format(), engine)?;
    info!(output = %args.output.display(), "done");
    Ok(())
}
