//! File-level PNG tests.

use comp_core::{BandFormat, Image};
use comp_io::{Format, IoError};
use tempfile::TempDir;

fn gradient_rgba(w: u32, h: u32) -> Image {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 64, (x * y) as u8]);
        }
    }
    Image::from_u8(w, h, 4, data).unwrap()
}

#[test]
fn write_then_read_rgba() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gradient.png");
    let img = gradient_rgba(16, 8);

    comp_io::write(&path, &img).unwrap();
    let back = comp_io::read(&path).unwrap();
    assert_eq!(back, img);
}

#[test]
fn uppercase_extension_is_png() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("IMAGE.PNG");
    let img = Image::filled(3, 3, BandFormat::U8, &[1.0, 2.0, 3.0]).unwrap();
    comp_io::write(&path, &img).unwrap();
    assert_eq!(Format::from_extension(&path), Format::Png);
    assert_eq!(comp_io::read(&path).unwrap(), img);
}

#[test]
fn signature_detects_png_without_extension() {
    let dir = TempDir::new().unwrap();
    let named = dir.path().join("a.png");
    let bare = dir.path().join("a.bin");
    let img = gradient_rgba(4, 4);
    comp_io::write(&named, &img).unwrap();
    std::fs::copy(&named, &bare).unwrap();

    assert_eq!(Format::detect(&bare).unwrap(), Format::Png);
    assert_eq!(comp_io::read(&bare).unwrap(), img);
}

#[test]
fn unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let img = gradient_rgba(2, 2);
    let err = comp_io::write(dir.path().join("out.exr"), &img).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedFormat(ext) if ext == "exr"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = comp_io::read(dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
}
