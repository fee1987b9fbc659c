//! CLI command implementations

pub mod compare;
pub mod composite;
pub mod premult;
pub mod resize;
pub mod stats;

use anyhow::{Context, Result};
use comp_core::{BandFormat, Image};
use comp_raster::{Engine, RasterOps};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    comp_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path, converted back to `like` if that is 16-bit.
///
/// Float results of alpha math otherwise go out as 8-bit.
pub fn save_image(path: &Path, image: &Image, like: BandFormat, engine: &Engine) -> Result<()> {
    let out = if like == BandFormat::U16 {
        engine.cast(image, BandFormat::U16)?
    } else {
        engine.cast(image, BandFormat::U8)?
    };
    comp_io::write(path, &out).with_context(|| format!("Failed to save: {}", path.display()))
}
