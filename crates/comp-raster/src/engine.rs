//! CPU raster engine.
//!
//! [`Engine`] implements [`RasterOps`] with the functions of this crate.
//! With the `parallel` feature it owns a rayon thread pool and runs every
//! operation inside it, so row work never lands on the global pool.
//!
//! ```rust
//! use comp_core::Image;
//! use comp_raster::{Engine, EngineConfig, RasterOps};
//!
//! let engine = Engine::init(EngineConfig { threads: 2 }).unwrap();
//! let a = Image::from_u8(1, 1, 1, vec![3]).unwrap();
//! let b = Image::from_u8(1, 1, 1, vec![4]).unwrap();
//! assert_eq!(engine.add(&a, &b).unwrap().samples(), &[7.0]);
//! ```

use crate::affine::{self, Affine};
use crate::traits::RasterOps;
use crate::{arithmetic, bands, select, stats};
use crate::{Kernel, RasterResult};
use comp_core::{BandFormat, Image, StatsResult};
use tracing::{debug, trace};

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Worker threads; 0 lets rayon pick (one per core).
    pub threads: usize,
}

/// Raster engine backed by the CPU.
pub struct Engine {
    config: EngineConfig,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl Engine {
    /// Starts the engine.
    ///
    /// # Errors
    ///
    /// [`RasterError::EngineInit`](crate::RasterError::EngineInit) if the
    /// thread pool can't be created.
    pub fn init(config: EngineConfig) -> RasterResult<Self> {
        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("comp-raster-{i}"))
            .build()
            .map_err(|e| crate::RasterError::EngineInit(e.to_string()))?;

        #[cfg(feature = "parallel")]
        debug!(threads = pool.current_num_threads(), "raster engine started");
        #[cfg(not(feature = "parallel"))]
        debug!("raster engine started (single-threaded)");

        Ok(Self {
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    /// Settings the engine was started with.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Number of worker threads in use.
    pub fn threads(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            self.pool.current_num_threads()
        }
        #[cfg(not(feature = "parallel"))]
        {
            1
        }
    }

    fn run<T, F>(&self, op: &'static str, f: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        trace!(op, "raster op");
        #[cfg(feature = "parallel")]
        {
            self.pool.install(f)
        }
        #[cfg(not(feature = "parallel"))]
        {
            f()
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("threads", &self.threads())
            .finish()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        debug!("raster engine shut down");
    }
}

impl RasterOps for Engine {
    fn extract_band(&self, src: &Image, start: u32, count: u32) -> RasterResult<Image> {
        self.run("extract_band", || bands::extract_band(src, start, count))
    }

    fn band_join(&self, a: &Image, b: &Image) -> RasterResult<Image> {
        self.run("band_join", || bands::band_join(a, b))
    }

    fn add(&self, a: &Image, b: &Image) -> RasterResult<Image> {
        self.run("add", || arithmetic::add(a, b))
    }

    fn subtract(&self, a: &Image, b: &Image) -> RasterResult<Image> {
        self.run("subtract", || arithmetic::subtract(a, b))
    }

    fn multiply(&self, a: &Image, b: &Image) -> RasterResult<Image> {
        self.run("multiply", || arithmetic::multiply(a, b))
    }

    fn divide(&self, a: &Image, b: &Image) -> RasterResult<Image> {
        self.run("divide", || arithmetic::divide(a, b))
    }

    fn abs(&self, src: &Image) -> RasterResult<Image> {
        self.run("abs", || arithmetic::abs(src))
    }

    fn linear(&self, src: &Image, scale: f64, offset: f64) -> RasterResult<Image> {
        self.run("linear", || arithmetic::linear(src, scale, offset))
    }

    fn cast(&self, src: &Image, format: BandFormat) -> RasterResult<Image> {
        self.run("cast", || arithmetic::cast(src, format))
    }

    fn affine(&self, src: &Image, matrix: &Affine, kernel: Kernel) -> RasterResult<Image> {
        self.run("affine", || affine::affine(src, matrix, kernel))
    }

    fn if_then_else(
        &self,
        cond: &Image,
        then: &Image,
        else_: &Image,
        blend: bool,
    ) -> RasterResult<Image> {
        self.run("if_then_else", || select::if_then_else(cond, then, else_, blend))
    }

    fn stats(&self, src: &Image) -> RasterResult<StatsResult> {
        self.run("stats", || stats::stats(src))
    }
}
