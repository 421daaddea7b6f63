//! Nearest-neighbour texture fetch.

pub use super::*;

/// The texel `(col, row)` that `(s, t)` maps to.
///
/// Only the fractional parts of `|s|` and `|t|` are used, so the mapping
/// repeats every unit and mirrors at zero.
#[inline]
pub fn texel_coordinates(
    width: u32,
    height: u32,
    s: f32,
    t: f32,
) -> (u32, u32) {
    let nearest = |coordinate: f32, size: u32| {
        let size_max = size.saturating_sub(1);
        // NaN and infinity fall to zero.
        let index = (coordinate.abs().fract() * size_max as f32 + 0.5) as u32;
        index.min(size_max)
    };

    (nearest(s, width), nearest(t, height))
}

/// Sampling the texture at `(s, t)` without filtering.
///
/// ## Example
///
/// ```rust
/// use gridsim_renderer::{function::texture::sample, scene::*};
///
/// let white = Vector3::splat(1.0);
/// let black = Vector3::splat(0.0);
/// let texture = Texture::checkerboard(2, 2, white, black).unwrap();
///
/// assert_eq!(sample(&texture, 0.0, 0.0), white);
/// assert_eq!(sample(&texture, 0.9, 0.0), black);
/// assert_eq!(sample(&texture, 1.9, 0.0), black);
/// assert_eq!(sample(&texture, -0.9, 0.0), black);
/// ```
pub fn sample(
    texture: &Texture,
    s: f32,
    t: f32,
) -> Vector3 {
    let width = texture.width();
    let (col, row) = texel_coordinates(width, texture.height(), s, t);
    texture.colors()[row as usize * width as usize + col as usize]
}
