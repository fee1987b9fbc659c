//! # comp-cli
//!
//! Library side of the `comp` tool:
//!
//! - [`host`] - Path-based composite / compare / resize for embedding
//! - [`logging`] - Subscriber setup used by the binary

#![warn(missing_docs)]

pub mod host;
pub mod logging;
