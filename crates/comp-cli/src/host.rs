//! Path-based entry points for embedding applications.
//!
//! [`Host`] bundles an [`Engine`] with the three operations a host needs:
//! composite two files, compare two files, resize a file. Each returns an
//! image or metric, or a [`HostError`]; nothing is written to disk.
//!
//! ```rust,no_run
//! use comp_cli::host::Host;
//! use comp_raster::EngineConfig;
//!
//! let host = Host::new(EngineConfig::default())?;
//! let out = host.composite("fg.png", "bg.png")?;
//! let cmp = host.compare("a.png", "b.png")?;
//! let half = host.resize("big.png", 0.5, "bicubic")?;
//! # Ok::<(), comp_cli::host::HostError>(())
//! ```

use comp_core::Image;
use comp_io::IoError;
use comp_ops::compare::{self, Comparison};
use comp_ops::{OpsError, composite, resize};
use comp_raster::{Engine, EngineConfig, RasterError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Failure of a host call.
#[derive(Debug, Error)]
pub enum HostError {
    /// Engine could not start.
    #[error(transparent)]
    Engine(#[from] RasterError),

    /// Loading an input failed.
    #[error("failed to load {path}")]
    Load {
        /// Offending file.
        path: String,
        /// Cause.
        #[source]
        source: IoError,
    },

    /// The operation itself failed.
    #[error(transparent)]
    Op(#[from] OpsError),
}

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// Engine plus path-based operations.
#[derive(Debug)]
pub struct Host {
    engine: Engine,
}

impl Host {
    /// Starts an engine with `config`.
    pub fn new(config: EngineConfig) -> HostResult<Self> {
        Ok(Self {
            engine: Engine::init(config)?,
        })
    }

    /// Wraps an existing engine.
    pub fn with_engine(engine: Engine) -> Self {
        Self { engine }
    }

    /// Engine used for every call.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Places the straight-alpha image at `src_path` over the one at
    /// `dst_path`. Returns a straight-alpha image.
    pub fn composite<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        src_path: P,
        dst_path: Q,
    ) -> HostResult<Image> {
        let src = load(src_path.as_ref())?;
        let dst = load(dst_path.as_ref())?;
        Ok(composite::overlay(&self.engine, &src, &dst)?)
    }

    /// Mean squared error between two files, plus the exact-equality flag.
    pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        path_a: P,
        path_b: Q,
    ) -> HostResult<Comparison> {
        let a = load(path_a.as_ref())?;
        let b = load(path_b.as_ref())?;
        Ok(compare::compare(&self.engine, &a, &b)?)
    }

    /// Scales the image at `path` by `scale` with the named kernel.
    ///
    /// RGBA inputs are resampled in premultiplied space; other band counts
    /// are resampled directly.
    pub fn resize<P: AsRef<Path>>(&self, path: P, scale: f64, kernel: &str) -> HostResult<Image> {
        let image = load(path.as_ref())?;
        let premultiply_first = image.is_rgba();
        Ok(resize::resize_named(
            &self.engine,
            &image,
            scale,
            kernel,
            premultiply_first,
        )?)
    }
}

fn load(path: &Path) -> HostResult<Image> {
    debug!(path = %path.display(), "host load");
    comp_io::read(path).map_err(|source| HostError::Load {
        path: path.display().to_string(),
        source,
    })
}
