//! Kernels of a frame.
//!
//! Each kernel module has the same layout:
//!
//! - `Arguments`: plain scalars and matrices of a launch.
//! - `Inputs`: read-only views of the buffers.
//! - `Outputs`: mutable views of the buffers.
//! - `main`: launching the kernel over its grid.

pub mod pixel;
pub mod post;
pub mod triangle;
pub mod vertex;

pub use super::*;
pub use crate::{
    function::{barycentric, matrix::Matrix3},
    grid::{launch, Dim3, Kernel, LaunchIndex, LaunchReport},
};

/// The block of a launch over an image.
pub const BLOCK_DIM_IMAGE: Dim3 =
    Dim3::new(BLOCK_SIZE_X as i32, BLOCK_SIZE_Y as i32, 1);

/// Tiles of [`BLOCK_DIM_IMAGE`] covering `width` by `height` pixels.
#[inline]
pub fn grid_dim_image(
    width: u32,
    height: u32,
) -> Dim3 {
    Dim3::tiles(
        Dim3::new(
            width.min(i32::MAX as u32) as i32,
            height.min(i32::MAX as u32) as i32,
            1,
        ),
        BLOCK_DIM_IMAGE,
    )
}

/// Ensuring a buffer view has exactly `target` elements.
#[inline]
pub(crate) fn check_length<T>(
    name: &'static str,
    buffer: &[T],
    target: usize,
) -> Result<(), Error> {
    if buffer.len() != target {
        return Err(Error::InvalidBufferLength {
            name,
            length: buffer.len(),
            target,
        });
    }
    Ok(())
}

/// The pixel of the thread in an image launch.
///
/// It is `None` for padding threads past the image.
#[inline]
pub(crate) fn pixel_of(
    index: &LaunchIndex,
    image_width: u32,
    image_height: u32,
) -> Option<(u32, u32)> {
    let x = index.global_x();
    let y = index.global_y();
    (x < image_width as u64 && y < image_height as u64)
        .then_some((x as u32, y as u32))
}
