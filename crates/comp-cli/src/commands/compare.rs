//! Compare command

use crate::{CompareArgs, Metric};
use anyhow::{Context, Result, bail};
use comp_ops::compare::{Comparison, compare_mse, compare_premultiplied, compare_std_dev};
use comp_raster::Engine;

pub fn run(args: CompareArgs, engine: &Engine) -> Result<()> {
    let actual = super::load_image(&args.actual)?;
    let expected = super::load_image(&args.expected)?;

    let value = match args.metric {
        Metric::Mse => compare_mse(engine, &actual, &expected),
        Metric::Stddev => compare_std_dev(engine, &actual, &expected),
        Metric::Premultiplied => compare_premultiplied(engine, &actual, &expected),
    }
    .with_context(|| {
        format!(
            "Cannot compare {} with {}",
            args.actual.display(),
            args.expected.display()
        )
    })?;

    println!("Comparing {} vs {}", args.actual.display(), args.expected.display());
    match args.metric {
        Metric::Stddev => println!("  Std deviation: {value:.6}"),
        Metric::Mse | Metric::Premultiplied => {
            println!("  {}", Comparison::from_mse(value));
        }
    }

    if let Some(threshold) = args.threshold {
        if value > threshold {
            bail!("FAIL: {value} exceeds threshold {threshold}");
        }
    }
    Ok(())
}
