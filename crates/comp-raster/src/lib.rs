//! # comp-raster
//!
//! Primitive raster operations on [`comp_core::Image`].
//!
//! Everything above this crate talks to the [`RasterOps`] trait; [`Engine`]
//! is the CPU implementation, optionally running rows on its own rayon
//! pool (`parallel` feature, on by default).
//!
//! # Modules
//!
//! - [`bands`] - Band extract and join
//! - [`arithmetic`] - add, subtract, multiply, divide, abs, linear, cast
//! - [`affine`] - Kernel-based geometric resampling
//! - [`select`] - Conditional select and blend
//! - [`stats`] - Statistics table and standard deviation
//! - [`scope`] - Arena for the intermediates of one operation
//!
//! # Example
//!
//! ```rust
//! use comp_core::Image;
//! use comp_raster::{Engine, EngineConfig, RasterOps};
//!
//! let engine = Engine::init(EngineConfig::default()).unwrap();
//! let a = Image::from_u8(1, 1, 4, vec![10, 20, 30, 255]).unwrap();
//! let b = Image::from_u8(1, 1, 4, vec![20, 20, 30, 255]).unwrap();
//!
//! let diff = engine.subtract(&b, &a).unwrap();
//! let stats = engine.stats(&diff).unwrap();
//! assert_eq!(stats.overall().sum_of_squares, 100.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;

pub mod affine;
pub mod arithmetic;
pub mod bands;
pub mod engine;
pub mod kernel;
pub mod scope;
pub mod select;
pub mod stats;
pub mod traits;

pub use affine::Affine;
pub use engine::{Engine, EngineConfig};
pub use error::{RasterError, RasterResult};
pub use kernel::{Kernel, UnknownKernel};
pub use scope::Scope;
pub use traits::RasterOps;
