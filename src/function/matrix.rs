//! Row-major 3x3 matrices.

pub use super::*;

use crate::preset::render::DETERMINANT_EPSILON;

/// A row-major 3x3 matrix, i.e., `M[row][col]`.
pub type Matrix3 = [[f32; 3]; 3];

pub const IDENTITY: Matrix3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Cofactor expansion along the first row.
#[inline]
pub fn determinant(m: &Matrix3) -> f32 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Inverting the matrix by the adjugate.
///
/// ## Errors
///
/// [`Error::SingularMatrix`] if `|det(m)|` is less than
/// [`DETERMINANT_EPSILON`].
///
/// ## Example
///
/// ```rust
/// use gridsim_renderer::function::matrix::{invert, IDENTITY};
///
/// let m = [[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 0.5]];
/// let m_inv = invert(&m).unwrap();
/// assert_eq!(m_inv, [[0.5, 0.0, 0.0], [0.0, 0.25, 0.0], [0.0, 0.0, 2.0]]);
///
/// assert!(invert(&[[1.0, 2.0, 3.0]; 3]).is_err());
/// assert_eq!(invert(&IDENTITY).unwrap(), IDENTITY);
/// ```
pub fn invert(m: &Matrix3) -> Result<Matrix3, Error> {
    let determinant = determinant(m);
    if !determinant.is_finite() || determinant.abs() < DETERMINANT_EPSILON {
        return Err(Error::SingularMatrix { determinant });
    }
    let d = determinant.recip();

    Ok([
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * d,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * d,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * d,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * d,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * d,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * d,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * d,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * d,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * d,
        ],
    ])
}

/// `a * b`
pub fn multiply(
    a: &Matrix3,
    b: &Matrix3,
) -> Matrix3 {
    let mut c = [[0.0; 3]; 3];
    for (row, c_row) in c.iter_mut().enumerate() {
        for (col, c_value) in c_row.iter_mut().enumerate() {
            *c_value = (0..3).map(|k| a[row][k] * b[k][col]).sum();
        }
    }
    c
}

/// `m * v` with `v` as a column vector.
#[inline]
pub fn transform(
    m: &Matrix3,
    v: Vector3,
) -> Vector3 {
    Vector3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}
