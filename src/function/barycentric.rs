//! Barycentric coordinates in screen space.

pub use super::*;

use crate::preset::render::DETERMINANT_EPSILON;

/// Inverting the matrix `[[1, 1, 1], [x0, x1, x2], [y0, y1, y2]]`.
///
/// Only `x` and `y` of each position are used.
///
/// ## Errors
///
/// [`Error::SingularMatrix`] if the triangle is degenerate.
pub fn inverse(positions: &[Vector3; 3]) -> Result<matrix::Matrix3, Error> {
    let [p0, p1, p2] = positions;
    matrix::invert(&[[1.0, 1.0, 1.0], [p0.x, p1.x, p2.x], [p0.y, p1.y, p2.y]])
}

/// Weights of the point `(x, y)` from a matrix made by [`inverse`].
#[inline]
pub fn weights(
    inverse: &matrix::Matrix3,
    x: f32,
    y: f32,
) -> Vector3 {
    matrix::transform(inverse, Vector3::new(1.0, x, y))
}

/// Twice the signed area of the triangle.
///
/// It is the determinant of `[[1, 1, 1], [x0, x1, x2], [y0, y1, y2]]`.
///
/// ## Errors
///
/// [`Error::SingularMatrix`] if `|2A|` is less than [`DETERMINANT_EPSILON`].
pub fn double_area(positions: &[Vector3; 3]) -> Result<f64, Error> {
    let [p0, p1, p2] = positions;
    let area = edge(p1, p2, p0);
    if !area.is_finite() || area.abs() < DETERMINANT_EPSILON as f64 {
        return Err(Error::SingularMatrix {
            determinant: area as f32,
        });
    }
    Ok(area)
}

/// Weights of `point` against the triangle.
///
/// The weights are edge functions evaluated in `f64`, each divided by
/// their sum. An edge shared by two triangles yields the same value of
/// opposite sign in both, so a point on it is inside at least one of them.
/// Vertices yield exact unit weights.
///
/// ## Errors
///
/// [`Error::SingularMatrix`] if the triangle is degenerate.
///
/// ## Example
///
/// ```rust
/// use gridsim_renderer::{function::barycentric::*, scene::Vector3};
///
/// let triangle = [
///     Vector3::new(41.0, 34.0, 0.0),
///     Vector3::new(39.0, 17.0, 0.0),
///     Vector3::new(46.0, 60.0, 0.0),
/// ];
///
/// let weights = barycentric(Vector3::new(39.0, 17.0, 0.0), &triangle).unwrap();
/// assert_eq!(weights, Vector3::new(0.0, 1.0, 0.0));
/// assert!(is_inside(weights));
/// ```
pub fn barycentric(
    point: Vector3,
    positions: &[Vector3; 3],
) -> Result<Vector3, Error> {
    double_area(positions)?;

    let [p0, p1, p2] = positions;
    let e0 = edge(p1, p2, &point);
    let e1 = edge(p2, p0, &point);
    let e2 = edge(p0, p1, &point);
    let sum = e0 + e1 + e2;

    Ok(Vector3::new(
        (e0 / sum) as f32,
        (e1 / sum) as f32,
        (e2 / sum) as f32,
    ))
}

/// The edge function of `a -> b` at `p`, i.e., twice the signed area of
/// `(a, b, p)`.
///
/// The endpoints are ordered before evaluating, so `edge(a, b, p)` is
/// exactly `-edge(b, a, p)`.
#[inline]
fn edge(
    a: &Vector3,
    b: &Vector3,
    p: &Vector3,
) -> f64 {
    let (a, b, sign) = if (a.x, a.y) <= (b.x, b.y) {
        (a, b, 1.0)
    } else {
        (b, a, -1.0)
    };
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (px, py) = (p.x as f64, p.y as f64);

    sign * ((bx - ax) * (py - ay) - (by - ay) * (px - ax))
}

/// A point is inside the triangle if no weight is negative.
///
/// Points on edges and vertices are inside, as [`barycentric`] yields
/// exact zero weights for them.
#[inline]
pub fn is_inside(weights: Vector3) -> bool {
    weights.x >= 0.0 && weights.y >= 0.0 && weights.z >= 0.0
}

/// `Σ λᵢ * valuesᵢ`
#[inline]
pub fn interpolate(
    weights: Vector3,
    values: [f32; 3],
) -> f32 {
    weights.x * values[0] + weights.y * values[1] + weights.z * values[2]
}
