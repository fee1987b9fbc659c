//! Arena for the intermediates of one operation.
//!
//! A [`Scope`] wraps a [`RasterOps`] backend and keeps a handle to every
//! image it produces. All of them are released together when the scope is
//! dropped, whether the operation finished or bailed out with `?`.
//!
//! ```rust
//! use comp_core::Image;
//! use comp_raster::{Engine, EngineConfig, Scope};
//!
//! let engine = Engine::init(EngineConfig::default()).unwrap();
//! let img = Image::from_u8(1, 1, 4, vec![10, 20, 30, 255]).unwrap();
//! let alpha = {
//!     let mut scope = Scope::new(&engine, "example");
//!     let alpha = scope.extract_band(&img, 3, 1).unwrap();
//!     assert_eq!(scope.len(), 1);
//!     alpha
//! };
//! assert_eq!(alpha.handle_count(), 1);
//! ```

use crate::affine::Affine;
use crate::traits::RasterOps;
use crate::{Kernel, RasterResult};
use comp_core::{BandFormat, Image, StatsResult};
use tracing::trace;

/// Owns the intermediates created during one top-level operation.
pub struct Scope<'a, R: RasterOps + ?Sized> {
    ops: &'a R,
    name: &'static str,
    locals: Vec<Image>,
}

impl<'a, R: RasterOps + ?Sized> Scope<'a, R> {
    /// Opens a scope named after the operation it serves.
    pub fn new(ops: &'a R, name: &'static str) -> Self {
        Self {
            ops,
            name,
            locals: Vec::new(),
        }
    }

    /// Number of intermediates held.
    pub fn len(&self) -> usize {
        self.locals.len()
    }

    /// True if nothing has been produced yet.
    pub fn is_empty(&self) -> bool {
        self.locals.is_empty()
    }

    fn keep(&mut self, result: RasterResult<Image>) -> RasterResult<Image> {
        let image = result?;
        self.locals.push(image.clone());
        Ok(image)
    }

    /// See [`RasterOps::extract_band`].
    pub fn extract_band(&mut self, src: &Image, start: u32, count: u32) -> RasterResult<Image> {
        let r = self.ops.extract_band(src, start, count);
        self.keep(r)
    }

    /// See [`RasterOps::band_join`].
    pub fn band_join(&mut self, a: &Image, b: &Image) -> RasterResult<Image> {
        let r = self.ops.band_join(a, b);
        self.keep(r)
    }

    /// See [`RasterOps::add`].
    pub fn add(&mut self, a: &Image, b: &Image) -> RasterResult<Image> {
        let r = self.ops.add(a, b);
        self.keep(r)
    }

    /// See [`RasterOps::subtract`].
    pub fn subtract(&mut self, a: &Image, b: &Image) -> RasterResult<Image> {
        let r = self.ops.subtract(a, b);
        self.keep(r)
    }

    /// See [`RasterOps::multiply`].
    pub fn multiply(&mut self, a: &Image, b: &Image) -> RasterResult<Image> {
        let r = self.ops.multiply(a, b);
        self.keep(r)
    }

    /// See [`RasterOps::divide`].
    pub fn divide(&mut self, a: &Image, b: &Image) -> RasterResult<Image> {
        let r = self.ops.divide(a, b);
        self.keep(r)
    }

    /// See [`RasterOps::abs`].
    pub fn abs(&mut self, src: &Image) -> RasterResult<Image> {
        let r = self.ops.abs(src);
        self.keep(r)
    }

    /// See [`RasterOps::linear`].
    pub fn linear(&mut self, src: &Image, scale: f64, offset: f64) -> RasterResult<Image> {
        let r = self.ops.linear(src, scale, offset);
        self.keep(r)
    }

    /// See [`RasterOps::cast`].
    pub fn cast(&mut self, src: &Image, format: BandFormat) -> RasterResult<Image> {
        let r = self.ops.cast(src, format);
        self.keep(r)
    }

    /// See [`RasterOps::affine`].
    pub fn affine(&mut self, src: &Image, matrix: &Affine, kernel: Kernel) -> RasterResult<Image> {
        let r = self.ops.affine(src, matrix, kernel);
        self.keep(r)
    }

    /// See [`RasterOps::if_then_else`].
    pub fn if_then_else(
        &mut self,
        cond: &Image,
        then: &Image,
        else_: &Image,
        blend: bool,
    ) -> RasterResult<Image> {
        let r = self.ops.if_then_else(cond, then, else_, blend);
        self.keep(r)
    }

    /// See [`RasterOps::stats`]. Tables are not images and are not held.
    pub fn stats(&mut self, src: &Image) -> RasterResult<StatsResult> {
        self.ops.stats(src)
    }

    /// See [`RasterOps::deviate`].
    pub fn deviate(&mut self, src: &Image) -> RasterResult<f64> {
        self.ops.deviate(src)
    }
}

impl<R: RasterOps + ?Sized> Drop for Scope<'_, R> {
    fn drop(&mut self) {
        trace!(scope = self.name, released = self.locals.len(), "scope released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, EngineConfig, RasterError};

    #[test]
    fn test_scope_holds_and_releases() {
        let engine = Engine::init(EngineConfig::default()).unwrap();
        let img = Image::from_u8(1, 1, 2, vec![4, 8]).unwrap();
        let kept;
        {
            let mut scope = Scope::new(&engine, "test");
            assert!(scope.is_empty());
            let a = scope.extract_band(&img, 0, 1).unwrap();
            let b = scope.extract_band(&img, 1, 1).unwrap();
            kept = scope.add(&a, &b).unwrap();
            assert_eq!(scope.len(), 3);
            assert_eq!(kept.handle_count(), 2);
        }
        assert_eq!(kept.handle_count(), 1);
        assert_eq!(kept.samples(), &[12.0]);
    }

    #[test]
    fn test_failed_op_is_not_held() {
        let engine = Engine::init(EngineConfig::default()).unwrap();
        let img = Image::from_u8(1, 1, 2, vec![4, 8]).unwrap();
        let mut scope = Scope::new(&engine, "test");
        let err = scope.extract_band(&img, 2, 1).unwrap_err();
        assert!(matches!(err, RasterError::BandRange { .. }));
        assert!(scope.is_empty());
    }

    #[test]
    fn test_scope_over_dyn_ops() {
        let engine = Engine::init(EngineConfig::default()).unwrap();
        let ops: &dyn RasterOps = &engine;
        let img = Image::from_u8(1, 1, 1, vec![9]).unwrap();
        let mut scope = Scope::new(ops, "dyn");
        assert_eq!(scope.abs(&img).unwrap().samples(), &[9.0]);
    }
}
