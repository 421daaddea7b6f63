//! Math shared by the kernels.

pub mod barycentric;
pub mod matrix;
pub mod texture;

pub use crate::{
    error::Error,
    scene::{Texture, Vector3},
};
