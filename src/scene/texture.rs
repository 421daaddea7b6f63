//! Row-major RGB texture.

pub use super::*;

use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use std::fmt;

/// A row-major grid of colors.
///
/// The texel at column `col` and row `row` is `colors[row * width + col]`.
#[derive(Clone, PartialEq)]
pub struct Texture {
    colors: Vec<Vector3>,
    height: u32,
    width: u32,
}

impl Texture {
    /// Creating a texture from row-major colors.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidTexture`] if either side is zero or
    /// `colors.len() != width * height`.
    pub fn new(
        width: u32,
        height: u32,
        colors: Vec<Vector3>,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidTexture(format!(
                "the size should be non-zero, but got {width}x{height}"
            )));
        }
        let texel_count = width as usize * height as usize;
        if colors.len() != texel_count {
            return Err(Error::InvalidTexture(format!(
                "the color count should be {texel_count}, but got {}",
                colors.len()
            )));
        }

        Ok(Self {
            colors,
            height,
            width,
        })
    }

    /// A two-color checkerboard with one-texel cells.
    ///
    /// The texel `(0, 0)` is `even`.
    pub fn checkerboard(
        width: u32,
        height: u32,
        even: Vector3,
        odd: Vector3,
    ) -> Result<Self, Error> {
        let colors = (0..height)
            .flat_map(|row| {
                (0..width).map(move |col| {
                    if (row + col) % 2 == 0 {
                        even
                    } else {
                        odd
                    }
                })
            })
            .collect();
        Self::new(width, height, colors)
    }

    /// Uniformly random colors from a fixed seed.
    pub fn noise(
        width: u32,
        height: u32,
        seed: u64,
    ) -> Result<Self, Error> {
        let distribution = Uniform::new_inclusive(0.0, 1.0);
        let texel_count = width as usize * height as usize;
        let colors = distribution
            .sample_iter(&mut StdRng::seed_from_u64(seed))
            .take(texel_count * 3)
            .collect::<Vec<f32>>()
            .chunks_exact(3)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, colors)
    }

    #[inline]
    pub fn colors(&self) -> &[Vector3] {
        &self.colors
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// The texel at (`col`, `row`), or `None` if it is outside.
    #[inline]
    pub fn texel(
        &self,
        col: u32,
        row: u32,
    ) -> Option<Vector3> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.colors
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// Nearest-neighbour lookup with mirrored wrap-around.
    ///
    /// See [`crate::function::texture::sample`].
    #[inline]
    pub fn sample(
        &self,
        s: f32,
        t: f32,
    ) -> Vector3 {
        crate::function::texture::sample(self, s, t)
    }
}

impl fmt::Debug for Texture {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("colors.len()", &self.colors.len())
            .finish()
    }
}
