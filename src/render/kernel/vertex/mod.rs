//! Transforming and projecting the vertices.

pub use super::*;

use crate::function::matrix;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Arguments {
    /// `P⁻¹`, the inverse of the camera basis.
    pub projection_inverse: Matrix3,
    /// `θ` in radians
    pub rotation_angle: f32,
    /// `k`
    pub rotation_axis: [f32; 3],
    /// `o`
    pub rotation_origin: [f32; 3],
    /// `V`
    pub vertex_count: u32,
    /// `c`
    pub view_position: [f32; 3],
}

#[derive(Clone, Copy, Debug)]
pub struct Inputs<'a> {
    /// `[V]`
    pub vertices: &'a [Vertex],
}

#[derive(Debug)]
pub struct Outputs<'a> {
    /// `[V]`
    ///
    /// `(x / w, y / w, w)` in screen space.
    pub vertices_projected: &'a mut [Vertex],
    /// `[V]`
    ///
    /// It is in world space.
    pub vertices_transformed: &'a mut [Vertex],
    /// `[V]`
    ///
    /// `w`, the distance along the view direction. It is written even if
    /// the vertex is behind the camera.
    pub view_depths: &'a mut [f32],
}

/// `V / B`
pub const BLOCK_DIM: Dim3 = Dim3::new(BLOCK_SIZE as i32, 1, 1);

#[derive(Debug)]
pub struct VertexKernel<'a> {
    pub arguments: Arguments,
    pub inputs: Inputs<'a>,
    pub outputs: Outputs<'a>,
}

/// Transforming and projecting the vertices.
///
/// For each one of the `V` vertices:
///
/// 1. Rotate the position `p` by `θ` around the axis `k` through `o`.
///
/// 2. Solve the screen coordinates with the inverse camera basis:
/// ```plaintext
/// [u, v, w] = P⁻¹ (p - c)
/// p' = (u / w, v / w, w)
/// ```
///
/// 3. Pass the texture coordinates through.
///
/// A vertex with `w` not above [`DETERMINANT_EPSILON`] fails with
/// [`Error::BehindCamera`] and is not projected.
pub fn main(
    arguments: Arguments,
    inputs: Inputs<'_>,
    outputs: Outputs<'_>,
) -> Result<LaunchReport, Error> {
    let vertex_count = arguments.vertex_count as usize;
    check_length("vertices", inputs.vertices, vertex_count)?;
    check_length("vertices_projected", outputs.vertices_projected, vertex_count)?;
    check_length(
        "vertices_transformed",
        outputs.vertices_transformed,
        vertex_count,
    )?;
    check_length("view_depths", outputs.view_depths, vertex_count)?;

    let grid_dim =
        Dim3::new(arguments.vertex_count.div_ceil(BLOCK_SIZE) as i32, 1, 1);

    launch(
        &mut VertexKernel {
            arguments,
            inputs,
            outputs,
        },
        grid_dim,
        BLOCK_DIM,
    )
}

impl Kernel for VertexKernel<'_> {
    fn execute(
        &mut self,
        index: LaunchIndex,
    ) -> Result<(), Error> {
        let arguments = &self.arguments;
        let vertex_index = index.global_linear();
        if vertex_index >= arguments.vertex_count as u64 {
            return Ok(());
        }
        let vertex_index = vertex_index as usize;

        let vertex = self.inputs.vertices[vertex_index];
        let rotation = Rotation::new(
            arguments.rotation_origin.into(),
            arguments.rotation_axis.into(),
            arguments.rotation_angle,
        );

        // p
        let position = rotation.apply(vertex.coords);
        self.outputs.vertices_transformed[vertex_index] =
            Vertex::new(position, vertex.s, vertex.t);

        // [u, v, w]
        let [u, v, w] = matrix::transform(
            &arguments.projection_inverse,
            position - Vector3::from(arguments.view_position),
        )
        .to_array();
        self.outputs.view_depths[vertex_index] = w;

        if w.is_nan() || w <= DETERMINANT_EPSILON {
            return Err(Error::BehindCamera { depth: w });
        }

        self.outputs.vertices_projected[vertex_index] =
            Vertex::new(Vector3::new(u / w, v / w, w), vertex.s, vertex.t);

        Ok(())
    }
}
