//! Host surface and binary tests over real PNG files.

use comp_cli::host::{Host, HostError};
use comp_core::{BandFormat, Image};
use comp_ops::OpsError;
use comp_raster::{EngineConfig, RasterOps};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn solid(dir: &Path, name: &str, w: u32, h: u32, px: [u8; 4]) -> PathBuf {
    let data = px.iter().copied().cycle().take((w * h * 4) as usize).collect();
    let img = Image::from_u8(w, h, 4, data).unwrap();
    let path = dir.join(name);
    comp_io::write(&path, &img).unwrap();
    path
}

fn host() -> Host {
    Host::new(EngineConfig { threads: 1 }).unwrap()
}

#[test]
fn host_composite_red_over_blue() {
    let dir = TempDir::new().unwrap();
    let red = solid(dir.path(), "red.png", 2, 2, [255, 0, 0, 255]);
    let blue = solid(dir.path(), "blue.png", 2, 2, [0, 0, 255, 255]);

    let h = host();
    let out = h.composite(&red, &blue).unwrap();
    let out = h.engine().cast(&out, BandFormat::U8).unwrap();
    assert_eq!(out, comp_io::read(&red).unwrap());
}

#[test]
fn host_compare_scenarios() {
    let dir = TempDir::new().unwrap();
    let a = solid(dir.path(), "a.png", 1, 1, [10, 20, 30, 255]);
    let b = solid(dir.path(), "b.png", 1, 1, [20, 20, 30, 255]);

    let h = host();
    let same = h.compare(&a, &a).unwrap();
    assert!(same.is_equal);
    assert_eq!(same.mean_squared_error, 0.0);

    let diff = h.compare(&a, &b).unwrap();
    assert_eq!(diff.mean_squared_error, 25.0);
    assert!(!diff.is_equal);
}

#[test]
fn host_compare_size_mismatch() {
    let dir = TempDir::new().unwrap();
    let a = solid(dir.path(), "a.png", 2, 2, [0, 0, 0, 255]);
    let b = solid(dir.path(), "b.png", 3, 2, [0, 0, 0, 255]);
    let err = host().compare(&a, &b).unwrap_err();
    assert!(matches!(err, HostError::Op(OpsError::ShapeMismatch(_))));
}

#[test]
fn host_resize_and_errors() {
    let dir = TempDir::new().unwrap();
    let img = solid(dir.path(), "img.png", 10, 6, [40, 80, 120, 200]);
    let h = host();

    let half = h.resize(&img, 0.5, "bicubic").unwrap();
    assert_eq!(half.dimensions(), (5, 3));
    let half = h.engine().cast(&half, BandFormat::U8).unwrap();
    assert!(half.samples().chunks(4).all(|px| px == [40.0, 80.0, 120.0, 200.0]));

    assert!(matches!(
        h.resize(&img, 0.5, "sinc"),
        Err(HostError::Op(OpsError::UnknownKernel(_)))
    ));
    assert!(matches!(
        h.resize(dir.path().join("missing.png"), 0.5, "bilinear"),
        Err(HostError::Load { .. })
    ));
}

fn solid16(dir: &Path, name: &str, w: u32, h: u32, px: [u16; 4]) -> PathBuf {
    let data = px.iter().copied().cycle().take((w * h * 4) as usize).collect();
    let img = Image::from_u16(w, h, 4, data).unwrap();
    let path = dir.join(name);
    comp_io::write(&path, &img).unwrap();
    path
}

#[test]
fn host_sixteen_bit_round_trip() {
    let dir = TempDir::new().unwrap();
    let red = solid16(dir.path(), "red16.png", 2, 2, [65535, 0, 0, 65535]);
    let blue = solid16(dir.path(), "blue16.png", 2, 2, [0, 0, 65535, 65535]);
    let h = host();

    let out = h.composite(&red, &blue).unwrap();
    let out = h.engine().cast(&out, BandFormat::U16).unwrap();
    assert!(out.samples().chunks(4).all(|px| px == [65535.0, 0.0, 0.0, 65535.0]));

    let saved = dir.path().join("out16.png");
    comp_io::write(&saved, &out).unwrap();
    assert_eq!(comp_io::read(&saved).unwrap(), comp_io::read(&red).unwrap());

    let soft = solid16(dir.path(), "soft16.png", 4, 4, [40000, 40000, 40000, 32768]);
    let half = h.resize(&soft, 0.5, "bilinear").unwrap();
    let half = h.engine().cast(&half, BandFormat::U16).unwrap();
    assert!(half.samples().chunks(4).all(|px| px == [40000.0, 40000.0, 40000.0, 32768.0]));
}

#[test]
fn host_mixed_bit_depths_rejected() {
    let dir = TempDir::new().unwrap();
    let red = solid(dir.path(), "red.png", 2, 2, [255, 0, 0, 255]);
    let blue = solid16(dir.path(), "blue16.png", 2, 2, [0, 0, 65535, 65535]);
    let err = host().composite(&red, &blue).unwrap_err();
    assert!(matches!(err, HostError::Op(OpsError::InvalidParameter(_))));
}

#[test]
fn binary_composite_and_compare() {
    let dir = TempDir::new().unwrap();
    let red = solid(dir.path(), "red.png", 4, 4, [255, 0, 0, 255]);
    let blue = solid(dir.path(), "blue.png", 4, 4, [0, 0, 255, 255]);
    let out = dir.path().join("out.png");

    let status = Command::new(env!("CARGO_BIN_EXE_comp"))
        .arg("composite")
        .arg(&blue)
        .arg(&red)
        .arg("-o")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let compare = Command::new(env!("CARGO_BIN_EXE_comp"))
        .args(["compare", "--threshold", "0"])
        .arg(&out)
        .arg(&red)
        .output()
        .unwrap();
    assert!(compare.status.success());
    assert!(String::from_utf8_lossy(&compare.stdout).contains("identical"));

    let mismatch = Command::new(env!("CARGO_BIN_EXE_comp"))
        .args(["compare", "--threshold", "0"])
        .arg(&out)
        .arg(&blue)
        .status()
        .unwrap();
    assert!(!mismatch.success());
}

#[test]
fn binary_stacks_sixteen_bit_layers() {
    let dir = TempDir::new().unwrap();
    let blue = solid16(dir.path(), "blue16.png", 3, 3, [0, 0, 65535, 65535]);
    let green = solid16(dir.path(), "green16.png", 3, 3, [0, 65535, 0, 32768]);
    let red = solid16(dir.path(), "red16.png", 3, 3, [65535, 0, 0, 65535]);

    for method in ["premultiplied", "straight"] {
        let out = dir.path().join(format!("{method}.png"));
        let status = Command::new(env!("CARGO_BIN_EXE_comp"))
            .arg("composite")
            .arg(&blue)
            .arg(&green)
            .arg(&red)
            .args(["--method", method, "-o"])
            .arg(&out)
            .status()
            .unwrap();
        assert!(status.success(), "{method}");
        assert_eq!(comp_io::read(&out).unwrap(), comp_io::read(&red).unwrap(), "{method}");
    }
}
