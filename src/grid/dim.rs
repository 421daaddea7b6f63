pub use super::*;

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Extents of a grid or a block.
///
/// The fields are signed so that negative extents can be rejected by
/// [`launch`] instead of wrapping around.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Pod, Zeroable)]
pub struct Dim3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Position of a block in the grid or of a thread in the block.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Pod, Zeroable)]
pub struct Index3 {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

/// Everything a thread knows about where it runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LaunchIndex {
    pub block_dim: Dim3,
    pub block_index: Index3,
    pub grid_dim: Dim3,
    pub thread_index: Index3,
}

impl Dim3 {
    #[inline]
    pub const fn new(
        x: i32,
        y: i32,
        z: i32,
    ) -> Self {
        Self { x, y, z }
    }

    /// `ceil(extent / block)` on every axis.
    ///
    /// It is the grid of `block`-sized tiles covering `extent`.
    /// A zero axis of `block` yields a zero axis.
    pub fn tiles(
        extent: Self,
        block: Self,
    ) -> Self {
        let div_ceil = |extent: i32, block: i32| {
            if block <= 0 {
                0
            } else {
                (extent.max(0) as i64 + block as i64 - 1) / block as i64
            }
        };

        Self {
            x: div_ceil(extent.x, block.x) as i32,
            y: div_ceil(extent.y, block.y) as i32,
            z: div_ceil(extent.z, block.z) as i32,
        }
    }

    /// The number of indices in the extents.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidDimension`] if any axis is negative or the count
    /// does not fit in `u64`.
    pub fn validate(
        &self,
        name: &'static str,
    ) -> Result<u64, Error> {
        let invalid = || Error::InvalidDimension {
            name,
            value: self.to_string(),
        };

        if self.x < 0 || self.y < 0 || self.z < 0 {
            return Err(invalid());
        }

        (self.x as u64)
            .checked_mul(self.y as u64)
            .and_then(|count| count.checked_mul(self.z as u64))
            .ok_or_else(invalid)
    }

    /// Iterating the indices with `z` outer, `y` middle and `x` inner.
    ///
    /// Negative axes are treated as zero.
    pub fn iter(&self) -> impl Iterator<Item = Index3> {
        let [x_count, y_count, z_count] =
            [self.x, self.y, self.z].map(|extent| extent.max(0) as u32);

        (0..z_count).flat_map(move |z| {
            (0..y_count)
                .flat_map(move |y| (0..x_count).map(move |x| Index3 { x, y, z }))
        })
    }
}

impl LaunchIndex {
    /// `block_index.x * block_dim.x + thread_index.x`
    #[inline]
    pub fn global_x(&self) -> u64 {
        self.block_index.x as u64 * self.block_dim.x as u64
            + self.thread_index.x as u64
    }

    /// `block_index.y * block_dim.y + thread_index.y`
    #[inline]
    pub fn global_y(&self) -> u64 {
        self.block_index.y as u64 * self.block_dim.y as u64
            + self.thread_index.y as u64
    }

    /// `block_index.z * block_dim.z + thread_index.z`
    #[inline]
    pub fn global_z(&self) -> u64 {
        self.block_index.z as u64 * self.block_dim.z as u64
            + self.thread_index.z as u64
    }

    /// The unique position of the thread in the whole launch, `x` fastest.
    #[inline]
    pub fn global_linear(&self) -> u64 {
        let width = self.grid_dim.x as u64 * self.block_dim.x as u64;
        let height = self.grid_dim.y as u64 * self.block_dim.y as u64;
        self.global_x() + width * (self.global_y() + height * self.global_z())
    }
}

impl From<(i32, i32, i32)> for Dim3 {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(u32, u32, u32)> for Index3 {
    #[inline]
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Dim3 {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

impl fmt::Display for Index3 {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

impl fmt::Display for LaunchIndex {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "block ({}) thread ({})",
            self.block_index, self.thread_index
        )
    }
}
