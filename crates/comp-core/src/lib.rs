//! # comp-core
//!
//! Core raster types shared by every comp-rs crate:
//!
//! - [`Image`] - Immutable multi-band raster with cheap cloning
//! - [`BandFormat`] - Sample numeric type and its promotion rules
//! - [`StatsResult`] - Per-band and aggregate statistics table
//! - [`Error`] - Construction errors
//!
//! ## Crate Structure
//!
//! ```text
//! comp-core (this crate)
//!    ^
//!    +-- comp-raster (primitive raster operations)
//!    |      ^
//!    |      +-- comp-ops (premultiply, composite, resize, compare)
//!    +-- comp-io (PNG read/write)
//!    +-- comp-cli (command-line tool and host surface)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod stats;

pub use error::{Error, Result};
pub use format::BandFormat;
pub use image::{ALPHA_BAND, COLOR_BANDS, Image};
pub use stats::{STATS_COLUMNS, StatsResult, StatsRow};
