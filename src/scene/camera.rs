//! Pinhole camera and model rotation.

pub use super::*;

use crate::function::matrix::{self, Matrix3};

/// A pinhole camera.
///
/// A point `p` projects to the screen through the basis `(a, b, c)`:
///
/// ```plaintext
/// p - position = u * a + v * b + w * c
/// screen = (u / w, v / w), depth = w
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Screen x direction.
    pub basis_a: Vector3,
    /// Screen y direction.
    pub basis_b: Vector3,
    /// From the camera to the screen origin, i.e., the top-left pixel.
    pub basis_c: Vector3,
    /// Position in world space.
    pub position: Vector3,
}

/// A rotation around an arbitrary axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    /// In radians.
    pub angle: f32,
    /// Direction of the axis. It need not be normalized.
    pub axis: Vector3,
    /// A point on the axis.
    pub origin: Vector3,
}

impl Camera {
    /// A camera at the world origin looking down `-z`, with `y` up on screen.
    ///
    /// `focal_length` is the distance from the camera to the screen plane
    /// in pixels.
    pub fn perspective(
        image_width: u32,
        image_height: u32,
        focal_length: f32,
    ) -> Self {
        Self {
            basis_a: Vector3::new(1.0, 0.0, 0.0),
            basis_b: Vector3::new(0.0, -1.0, 0.0),
            basis_c: Vector3::new(
                -(image_width as f32) / 2.0,
                image_height as f32 / 2.0,
                -focal_length,
            ),
            position: Vector3::ZERO,
        }
    }

    /// The matrix whose columns are `a`, `b` and `c`.
    pub fn projection(&self) -> Matrix3 {
        let [a, b, c] = [self.basis_a, self.basis_b, self.basis_c];
        [[a.x, b.x, c.x], [a.y, b.y, c.y], [a.z, b.z, c.z]]
    }

    /// Inverse of [`Camera::projection`], computed once per frame.
    ///
    /// ## Errors
    ///
    /// [`Error::SingularMatrix`] if the basis vectors are coplanar.
    #[inline]
    pub fn projection_inverse(&self) -> Result<Matrix3, Error> {
        matrix::invert(&self.projection())
    }
}

impl Rotation {
    /// The identity rotation.
    pub const NONE: Self = Self {
        angle: 0.0,
        axis: Vector3::new(0.0, 0.0, 1.0),
        origin: Vector3::ZERO,
    };

    #[inline]
    pub const fn new(
        origin: Vector3,
        axis: Vector3,
        angle: f32,
    ) -> Self {
        Self {
            angle,
            axis,
            origin,
        }
    }

    /// The rotation of `frame_index` in an animation turning once every
    /// `frame_count` frames.
    pub fn frame(
        origin: Vector3,
        axis: Vector3,
        frame_index: u32,
        frame_count: u32,
    ) -> Self {
        let angle = if frame_count == 0 {
            0.0
        } else {
            std::f32::consts::TAU
                * ((frame_index % frame_count) as f32 / frame_count as f32)
        };
        Self::new(origin, axis, angle)
    }

    /// Rotating `point` with Rodrigues' formula.
    ///
    /// A zero-length axis leaves the point unchanged.
    pub fn apply(
        &self,
        point: Vector3,
    ) -> Vector3 {
        let Some(k) = self.axis.normalize() else {
            return point;
        };
        let (sin, cos) = self.angle.sin_cos();
        let v = point - self.origin;

        // v cos + (k x v) sin + k (k . v) (1 - cos)
        let rotated = v * cos + k.cross(v) * sin + k * (k.dot(v) * (1.0 - cos));

        self.origin + rotated
    }
}

impl Default for Rotation {
    #[inline]
    fn default() -> Self {
        Self::NONE
    }
}
