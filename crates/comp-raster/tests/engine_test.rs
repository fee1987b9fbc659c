//! Engine-level tests: thread counts, chained primitives, resampling.

use approx::assert_relative_eq;
use comp_core::{BandFormat, Image};
use comp_raster::{Affine, Engine, EngineConfig, Kernel, RasterOps, Scope};

fn noise(w: u32, h: u32, bands: u32) -> Image {
    let mut state = 0x2545_f491u32;
    let data = (0..w * h * bands)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 256) as u8
        })
        .collect();
    Image::from_u8(w, h, bands, data).unwrap()
}

#[test]
fn results_do_not_depend_on_thread_count() {
    let img = noise(37, 23, 4);
    let one = Engine::init(EngineConfig { threads: 1 }).unwrap();
    let many = Engine::init(EngineConfig { threads: 4 }).unwrap();

    for k in Kernel::ALL {
        let m = Affine::scale(1.3);
        assert_eq!(one.affine(&img, &m, k).unwrap(), many.affine(&img, &m, k).unwrap());
    }
    let alpha = one.extract_band(&img, 3, 1).unwrap();
    assert_eq!(
        one.multiply(&img, &alpha).unwrap(),
        many.multiply(&img, &alpha).unwrap()
    );
    assert_eq!(one.stats(&img).unwrap(), many.stats(&img).unwrap());
}

#[test]
fn chained_alpha_scaling_in_scope() {
    let engine = Engine::init(EngineConfig::default()).unwrap();
    let img = Image::from_u8(2, 1, 4, vec![200, 100, 50, 255, 200, 100, 50, 0]).unwrap();

    let mut scope = Scope::new(&engine, "chain");
    let rgb = scope.extract_band(&img, 0, 3).unwrap();
    let alpha = scope.extract_band(&img, 3, 1).unwrap();
    let a = scope.linear(&alpha, 1.0 / 255.0, 0.0).unwrap();
    let scaled = scope.multiply(&rgb, &a).unwrap();
    let out = scope.band_join(&scaled, &alpha).unwrap();
    assert_eq!(scope.len(), 5);

    assert_eq!(out.format(), BandFormat::F32);
    assert_eq!(out.bands(), 4);
    assert_eq!(out.pixel(1, 0), &[0.0, 0.0, 0.0, 0.0]);
    assert_relative_eq!(out.pixel(0, 0)[0], 200.0, epsilon = 1e-3);
}

#[test]
fn downscale_averages_neighbours() {
    let engine = Engine::init(EngineConfig::default()).unwrap();
    // Checkerboard 0/100 halves to a flat 50 with bilinear.
    let data = (0..16).map(|i| if (i % 4 + i / 4) % 2 == 0 { 0.0 } else { 100.0 });
    let img = Image::from_samples(4, 4, 1, BandFormat::F32, data.collect()).unwrap();
    let out = engine.affine(&img, &Affine::scale(0.5), Kernel::Bilinear).unwrap();
    assert_eq!(out.dimensions(), (2, 2));
    for v in out.samples() {
        assert_relative_eq!(*v, 50.0, epsilon = 1e-9);
    }
}

#[test]
fn deviate_matches_stats() {
    let engine = Engine::init(EngineConfig::default()).unwrap();
    let img = noise(9, 7, 3);
    let stats = engine.stats(&img).unwrap();
    assert_eq!(engine.deviate(&img).unwrap(), stats.overall().stddev);
    assert_eq!(stats.band_count(), 3);
    let total: f64 = (0..3).map(|b| stats.band(b).unwrap().sum).sum();
    assert_relative_eq!(total, stats.overall().sum);
}
