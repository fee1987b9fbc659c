//! Stats command

use crate::StatsArgs;
use anyhow::Result;
use comp_core::StatsRow;
use comp_raster::{Engine, RasterOps};

pub fn run(args: StatsArgs, engine: &Engine) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let stats = engine.stats(&image)?;

    println!(
        "{}: {}x{}, {} bands, {}",
        args.input.display(),
        image.width(),
        image.height(),
        image.bands(),
        image.format()
    );
    println!(
        "{:>6} {:>10} {:>10} {:>12} {:>10} {:>10}  {:>9}  {:>9}",
        "band", "min", "max", "sum", "mean", "stddev", "min at", "max at"
    );
    print_row("all", stats.overall());
    for b in 0..stats.band_count() {
        if let Some(row) = stats.band(b) {
            print_row(&b.to_string(), row);
        }
    }
    Ok(())
}

fn print_row(label: &str, r: &StatsRow) {
    println!(
        "{:>6} {:>10.3} {:>10.3} {:>12.1} {:>10.3} {:>10.3}  {:>9}  {:>9}",
        label,
        r.min,
        r.max,
        r.sum,
        r.mean,
        r.stddev,
        format!("{},{}", r.xmin, r.ymin),
        format!("{},{}", r.xmax, r.ymax)
    );
}
