pub mod camera;
pub mod cube;
pub mod texture;

pub use crate::error::Error;
pub use bytemuck::{Pod, Zeroable};
pub use camera::*;
pub use texture::*;

use std::{fmt, ops};

/// A plain triple of `f32`.
///
/// It carries positions, colors (expected in `0.0 ~ 1.0`) and barycentric
/// weights alike.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A position with texture coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub coords: Vector3,
    pub s: f32,
    pub t: f32,
}

/// Three indices into a vertex array.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub v1: u32,
    pub v2: u32,
    pub v3: u32,
}

/// A scene to render.
#[derive(Clone, PartialEq)]
pub struct Scene {
    pub texture: Texture,
    pub triangles: Vec<Triangle>,
    pub vertices: Vec<Vertex>,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(
        x: f32,
        y: f32,
        z: f32,
    ) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub const fn from_array(array: [f32; 3]) -> Self {
        Self::new(array[0], array[1], array[2])
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn dot(
        self,
        other: Self,
    ) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(
        self,
        other: Self,
    ) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns `None` if the length is zero or not finite.
    pub fn normalize(self) -> Option<Self> {
        let length = self.length();
        length.is_normal().then(|| {
            Self::new(self.x / length, self.y / length, self.z / length)
        })
    }

    /// Sum of the absolute values of the components.
    #[inline]
    pub fn abs_sum(self) -> f32 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Component-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }
}

impl Vertex {
    #[inline]
    pub const fn new(
        coords: Vector3,
        s: f32,
        t: f32,
    ) -> Self {
        Self { coords, s, t }
    }
}

impl Triangle {
    #[inline]
    pub const fn new(
        v1: u32,
        v2: u32,
        v3: u32,
    ) -> Self {
        Self { v1, v2, v3 }
    }

    #[inline]
    pub const fn indices(&self) -> [u32; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Checking that every index addresses one of `vertex_count` vertices.
    pub fn validate(
        &self,
        vertex_count: usize,
    ) -> Result<(), Error> {
        match self
            .indices()
            .into_iter()
            .find(|&index| index as usize >= vertex_count)
        {
            Some(index) => Err(Error::InvalidVertexIndex {
                index,
                count: vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Fetching the three vertices from `vertices`.
    pub fn vertices(
        &self,
        vertices: &[Vertex],
    ) -> Result<[Vertex; 3], Error> {
        self.validate(vertices.len())?;
        Ok(self.indices().map(|index| vertices[index as usize]))
    }
}

impl Scene {
    /// Checking every triangle against the vertex array.
    pub fn validate(&self) -> Result<(), Error> {
        self.triangles
            .iter()
            .try_for_each(|triangle| triangle.validate(self.vertices.len()))
    }
}

impl ops::Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl ops::Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl ops::Mul<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(
        self,
        rhs: f32,
    ) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl ops::Mul for Vector3 {
    type Output = Self;

    /// Component-wise product.
    #[inline]
    fn mul(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from(array: [f32; 3]) -> Self {
        Self::from_array(array)
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(vector: Vector3) -> Self {
        vector.to_array()
    }
}

impl fmt::Debug for Scene {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Scene")
            .field("texture", &self.texture)
            .field("triangles.len()", &self.triangles.len())
            .field("vertices.len()", &self.vertices.len())
            .finish()
    }
}
