//! # comp-io
//!
//! Image file input/output for comp-rs.
//!
//! PNG is the only supported format. [`read`] recognizes it by extension
//! or by its signature; [`write`] goes by extension.
//!
//! # Example
//!
//! ```rust,no_run
//! let image = comp_io::read("input.png")?;
//! comp_io::write("output.png", &image)?;
//! # Ok::<(), comp_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod png;

pub use error::{IoError, IoResult};

use comp_core::Image;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics.
    Png,
    /// Anything else.
    Unknown,
}

impl Format {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Format::Png,
            _ => Format::Unknown,
        }
    }

    /// Detects the format from the first bytes of the file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut header = [0u8; 8];
        let mut file = File::open(path)?;
        let n = file.read(&mut header)?;
        Ok(if n == header.len() && header == PNG_SIGNATURE {
            Format::Png
        } else {
            Format::Unknown
        })
    }

    /// Extension first, then signature.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        match Self::from_extension(&path) {
            Format::Unknown => Self::from_magic_bytes(path),
            known => Ok(known),
        }
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Reads an image from a file, auto-detecting the format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    match Format::detect(path)? {
        Format::Png => png::read(path),
        Format::Unknown => Err(unsupported(path)),
    }
}

/// Writes an image to a file, choosing the format from the extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created
/// - The extension is not a supported format
/// - The image has a band count the format can't hold
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Png => png::write(path, image),
        Format::Unknown => Err(unsupported(path)),
    }
}
