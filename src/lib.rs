#![allow(clippy::excessive_precision)]
#![allow(missing_docs)]

//! A CPU-hosted simulator of a GPU-style compute grid.
//!
//! Rasterization kernels (vertex transform, triangle coverage, pixel shading
//! and depth-edge post-processing) are launched over a grid/block/thread
//! index space that the host walks sequentially.

pub mod error;
pub mod function;
pub mod grid;
pub mod preset;
pub mod render;
pub mod scene;

pub use error::Error;
