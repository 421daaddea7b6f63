//! A textured cube in front of the default camera.

pub use super::*;

/// Center of the cube.
pub const CUBE_CENTER: Vector3 = Vector3::new(0.0, 0.0, -30.0);

/// The axis the cube spins around.
pub const CUBE_SPIN_AXIS: Vector3 = Vector3::new(1.0, 1.0, 0.0);

/// Side length of a checkerboard texture cell in texels.
pub const CUBE_TEXTURE_SIZE: u32 = 10;

impl Scene {
    /// A 20-unit cube centered at [`CUBE_CENTER`] with a black and white
    /// checkerboard on every face.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use gridsim_renderer::scene::Scene;
    ///
    /// let scene = Scene::cube();
    /// assert_eq!(scene.vertices.len(), 8);
    /// assert_eq!(scene.triangles.len(), 12);
    /// assert!(scene.validate().is_ok());
    /// ```
    pub fn cube() -> Self {
        let vertex = |x: f32, y: f32, z: f32, s: f32, t: f32| {
            Vertex::new(Vector3::new(x, y, z), s, t)
        };

        let vertices = vec![
            // Front
            vertex(-10.0, -10.0, -20.0, 0.0, 0.0),
            vertex(-10.0, 10.0, -20.0, 0.0, 1.0),
            vertex(10.0, -10.0, -20.0, 1.0, 0.0),
            vertex(10.0, 10.0, -20.0, 1.0, 1.0),
            // Back
            vertex(-10.0, -10.0, -40.0, 0.0, 1.0),
            vertex(-10.0, 10.0, -40.0, 1.0, 1.0),
            vertex(10.0, -10.0, -40.0, 0.0, 0.0),
            vertex(10.0, 10.0, -40.0, 1.0, 0.0),
        ];

        let triangles = vec![
            // Front
            Triangle::new(0, 1, 2),
            Triangle::new(3, 1, 2),
            // Top
            Triangle::new(1, 3, 5),
            Triangle::new(7, 3, 5),
            // Bottom
            Triangle::new(0, 2, 4),
            Triangle::new(6, 2, 4),
            // Back
            Triangle::new(4, 5, 6),
            Triangle::new(7, 5, 6),
            // Left
            Triangle::new(0, 1, 4),
            Triangle::new(5, 1, 4),
            // Right
            Triangle::new(2, 3, 6),
            Triangle::new(7, 3, 6),
        ];

        let texture = Self::cube_texture();

        Self {
            texture,
            triangles,
            vertices,
        }
    }

    /// The spin of [`Scene::cube`] at `frame_index` of `frame_count`.
    #[inline]
    pub fn cube_rotation(
        frame_index: u32,
        frame_count: u32,
    ) -> Rotation {
        Rotation::frame(CUBE_CENTER, CUBE_SPIN_AXIS, frame_index, frame_count)
    }

    fn cube_texture() -> Texture {
        let white = Vector3::splat(1.0);
        let black = Vector3::splat(0.0);
        let size = CUBE_TEXTURE_SIZE as usize;
        let colors = (0..size * size)
            .map(|index| {
                if (index / size + index % size) % 2 == 0 {
                    white
                } else {
                    black
                }
            })
            .collect();

        Texture::new(CUBE_TEXTURE_SIZE, CUBE_TEXTURE_SIZE, colors)
            .expect("The cube texture is square and fully populated")
    }
}
