//! # comp-ops
//!
//! Alpha-aware operations built on the [`comp_raster::RasterOps`] contract.
//!
//! # Modules
//!
//! - [`alpha`] - Premultiply / unpremultiply with a zero-alpha policy
//! - [`composite`] - Porter-Duff "over", straight and premultiplied
//! - [`resize`] - Resampling in premultiplied space
//! - [`compare`] - MSE and standard deviation between two images
//! - [`guard`] - Band count and shape checks
//!
//! Every operation takes the raster backend by reference, creates its
//! intermediates in a [`comp_raster::Scope`], and returns a fresh image or
//! metric. Inputs are never modified.
//!
//! # Example
//!
//! ```rust
//! use comp_core::{BandFormat, Image};
//! use comp_ops::{composite, compare};
//! use comp_raster::{Engine, EngineConfig};
//!
//! let engine = Engine::init(EngineConfig::default()).unwrap();
//! let fg = Image::filled(4, 4, BandFormat::U8, &[255.0, 0.0, 0.0, 128.0]).unwrap();
//! let bg = Image::filled(4, 4, BandFormat::U8, &[0.0, 0.0, 255.0, 255.0]).unwrap();
//!
//! let out = composite::overlay(&engine, &fg, &bg).unwrap();
//! let cmp = compare::compare(&engine, &out, &out).unwrap();
//! assert!(cmp.is_equal);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub mod alpha;
pub mod compare;
pub mod composite;
pub mod guard;
pub mod resize;

pub use alpha::ZeroAlpha;
pub use compare::Comparison;
pub use error::{OpsError, OpsResult};
