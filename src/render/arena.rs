//! Per-frame buffers reused across frames.

pub use super::*;

use humansize::{format_size, BINARY};
use rayon::prelude::*;
use std::mem::size_of;

/// Typed buffers shared by the kernels of one frame.
///
/// The buffers are allocated on the first [`FrameArena::reset`] and only
/// grow afterwards. Every reset clears them to their initial values in
/// place.
#[derive(Clone, Debug, Default)]
pub struct FrameArena {
    /// `[I_y, I_x]`
    pub colors: Vec<Vector3>,
    /// `[I_y, I_x]`
    ///
    /// A copy of [`FrameArena::colors`] taken before post-processing.
    pub colors_previous: Vec<Vector3>,
    /// `[I_y, I_x]`
    pub depths: Vec<f32>,
    /// `I_y`
    pub image_height: u32,
    /// `I_x`
    pub image_width: u32,
    /// `[I_y, I_x]`
    pub tags: Vec<i32>,
    /// `[P]`
    pub vertices_projected: Vec<Vertex>,
    /// `[P]`
    pub vertices_transformed: Vec<Vertex>,
    /// `[P]`
    pub view_depths: Vec<f32>,
}

impl FrameArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// `I_x * I_y`
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// `P`
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices_projected.len()
    }

    /// Preparing the buffers for a frame of `image_width` by `image_height`
    /// pixels and `vertex_count` vertices.
    ///
    /// - Depths are cleared to [`DEPTH_CLEAR`].
    /// - Tags are cleared to [`TAG_EMPTY`].
    /// - Colors are cleared to `background`.
    /// - Vertex slots are zeroed.
    pub fn reset(
        &mut self,
        image_width: u32,
        image_height: u32,
        vertex_count: usize,
        background: Vector3,
    ) -> &mut Self {
        self.image_width = image_width;
        self.image_height = image_height;

        let pixel_count = self.pixel_count();
        let capacity_previous = self.capacity_size();

        self.colors.resize(pixel_count, background);
        self.colors_previous.resize(pixel_count, background);
        self.depths.resize(pixel_count, DEPTH_CLEAR);
        self.tags.resize(pixel_count, TAG_EMPTY);
        self.vertices_projected.resize(vertex_count, Vertex::zeroed());
        self.vertices_transformed.resize(vertex_count, Vertex::zeroed());
        self.view_depths.resize(vertex_count, 0.0);

        self.colors.par_iter_mut().for_each(|c| *c = background);
        self.depths.par_iter_mut().for_each(|d| *d = DEPTH_CLEAR);
        self.tags.par_iter_mut().for_each(|t| *t = TAG_EMPTY);
        self.vertices_projected.fill(Vertex::zeroed());
        self.vertices_transformed.fill(Vertex::zeroed());
        self.view_depths.fill(0.0);

        let capacity = self.capacity_size();
        if capacity != capacity_previous {
            log::debug!(
                target: "gridsim::render::arena",
                "allocate {} for {image_width}x{image_height} pixels and {vertex_count} vertices",
                format_size(capacity, BINARY),
            );
        }

        self
    }

    /// Copying the colors to [`FrameArena::colors_previous`].
    pub fn snapshot_colors(&mut self) -> &[Vector3] {
        self.colors_previous
            .par_iter_mut()
            .zip(self.colors.par_iter())
            .for_each(|(previous, current)| *previous = *current);
        &self.colors_previous
    }

    /// The allocated size in bytes.
    pub fn capacity_size(&self) -> usize {
        (self.colors.capacity() + self.colors_previous.capacity())
            * size_of::<Vector3>()
            + (self.depths.capacity() + self.view_depths.capacity())
                * size_of::<f32>()
            + self.tags.capacity() * size_of::<i32>()
            + (self.vertices_projected.capacity()
                + self.vertices_transformed.capacity())
                * size_of::<Vertex>()
    }
}
