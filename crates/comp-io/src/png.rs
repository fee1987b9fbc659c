//! PNG format support.
//!
//! Reads 8-bit and 16-bit PNG files into an [`Image`] and writes images
//! back out.
//!
//! # Features
//!
//! - Gray, gray+alpha, RGB and RGBA, kept at their band count
//! - Palette and sub-byte gray expanded to 8-bit (tRNS becomes alpha)
//! - 16-bit files read as `U16` and written back as 16-bit
//! - Any other format written as 8-bit, rounded and saturated
//!
//! # Example
//!
//! ```rust
//! use comp_core::Image;
//! use comp_io::png::{decode, encode};
//!
//! let img = Image::from_u8(2, 1, 4, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
//! let mut bytes = Vec::new();
//! encode(&mut bytes, &img).unwrap();
//! assert_eq!(decode(std::io::Cursor::new(bytes)).unwrap(), img);
//! ```

use crate::{IoError, IoResult};
use comp_core::{BandFormat, Image};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let image = decode(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        bands = image.bands(),
        format = %image.format(),
        "read png"
    );
    Ok(image)
}

/// Decodes a PNG stream.
pub fn decode<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let bands = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedLayout(format!(
                "color type {other:?} after expansion"
            )));
        }
    };

    let image = match info.bit_depth {
        png::BitDepth::Eight => Image::from_u8(info.width, info.height, bands, data.to_vec())?,
        png::BitDepth::Sixteen => {
            Image::from_u16(info.width, info.height, bands, bytes_to_u16(data))?
        }
        depth => {
            return Err(IoError::UnsupportedLayout(format!("bit depth {depth:?}")));
        }
    };
    Ok(image)
}

/// Writes an image to a PNG file.
///
/// `U16` images are written as 16-bit, everything else as 8-bit.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, image)?;
    writer.flush()?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        bands = image.bands(),
        "wrote png"
    );
    Ok(())
}

/// Encodes an image as PNG into `writer`.
pub fn encode<W: Write>(writer: W, image: &Image) -> IoResult<()> {
    let color_type = match image.bands() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => {
            return Err(IoError::UnsupportedLayout(format!(
                "PNG holds 1-4 bands, image has {n}"
            )));
        }
    };
    let sixteen = image.format() == BandFormat::U16;

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(if sixteen {
        png::BitDepth::Sixteen
    } else {
        png::BitDepth::Eight
    });
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    let bytes = if sixteen {
        u16_to_bytes(&image.to_u16())
    } else {
        image.to_u8()
    };
    png_writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

fn u16_to_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn round_trip(image: &Image) -> Image {
        let mut bytes = Vec::new();
        encode(&mut bytes, image).unwrap();
        decode(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_round_trip_every_band_count() {
        for bands in 1..=4u32 {
            let data = (0..3 * 2 * bands).map(|i| (i * 13) as u8).collect();
            let img = Image::from_u8(3, 2, bands, data).unwrap();
            assert_eq!(round_trip(&img), img, "{bands} bands");
        }
    }

    #[test]
    fn test_sixteen_bit_kept() {
        let img = Image::from_u16(2, 1, 3, vec![0, 1000, 65535, 7, 300, 40000]).unwrap();
        let back = round_trip(&img);
        assert_eq!(back.format(), BandFormat::U16);
        assert_eq!(back, img);
    }

    #[test]
    fn test_float_written_as_bytes() {
        let img = Image::from_f32(1, 1, 4, vec![-3.0, 127.6, 300.0, 254.5]).unwrap();
        let back = round_trip(&img);
        assert_eq!(back.format(), BandFormat::U8);
        assert_eq!(back.samples(), &[0.0, 128.0, 255.0, 255.0]);
    }

    #[test]
    fn test_too_many_bands() {
        let img = Image::filled(1, 1, BandFormat::U8, &[0.0; 5]).unwrap();
        let err = encode(Vec::new(), &img).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedLayout(_)));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode(Cursor::new(b"not a png".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
