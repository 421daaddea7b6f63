//! Shading the covered pixels with the texture.

pub use super::*;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Arguments {
    /// `I_y`
    pub image_height: u32,
    /// `I_x`
    pub image_width: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct Inputs<'a> {
    /// `[I_y, I_x]`
    pub tags: &'a [i32],
    pub texture: &'a Texture,
    /// `[T]`
    pub triangles: &'a [Triangle],
    /// `[V]`
    pub vertices_projected: &'a [Vertex],
}

#[derive(Debug)]
pub struct Outputs<'a> {
    /// `[I_y, I_x]`
    pub colors: &'a mut [Vector3],
}

#[derive(Debug)]
pub struct PixelKernel<'a> {
    pub arguments: Arguments,
    pub inputs: Inputs<'a>,
    pub outputs: Outputs<'a>,
}

/// Shading the pixels.
///
/// For each pixel `(x, y)` tagged with a triangle:
///
/// 1. Compute the barycentric weights `λ` of `(x, y)` against the
///    projected vertices of the triangle.
///
/// 2. Interpolate the texture coordinates perspective-correctly with
///    the view depths `zᵢ`:
/// ```plaintext
/// s = Σ (λᵢ sᵢ / zᵢ) / Σ (λᵢ / zᵢ)
/// t = Σ (λᵢ tᵢ / zᵢ) / Σ (λᵢ / zᵢ)
/// ```
///
/// 3. Write the texel at `(s, t)` to the color buffer.
///
/// Untagged pixels keep their color.
pub fn main(
    arguments: Arguments,
    inputs: Inputs<'_>,
    outputs: Outputs<'_>,
) -> Result<LaunchReport, Error> {
    let pixel_count =
        arguments.image_width as usize * arguments.image_height as usize;
    check_length("tags", inputs.tags, pixel_count)?;
    check_length("colors", outputs.colors, pixel_count)?;

    launch(
        &mut PixelKernel {
            arguments,
            inputs,
            outputs,
        },
        grid_dim_image(arguments.image_width, arguments.image_height),
        BLOCK_DIM_IMAGE,
    )
}

impl Kernel for PixelKernel<'_> {
    fn execute(
        &mut self,
        index: LaunchIndex,
    ) -> Result<(), Error> {
        let arguments = &self.arguments;
        let inputs = &self.inputs;
        let Some((x, y)) =
            pixel_of(&index, arguments.image_width, arguments.image_height)
        else {
            return Ok(());
        };

        let pixel_index = y as usize * arguments.image_width as usize + x as usize;
        let tag = inputs.tags[pixel_index];
        if tag == TAG_EMPTY {
            return Ok(());
        }

        let triangle = usize::try_from(tag)
            .ok()
            .and_then(|tag| inputs.triangles.get(tag))
            .ok_or(Error::InvalidTriangleIndex {
                index: tag as i64,
                count: inputs.triangles.len(),
            })?;
        let vertices = triangle.vertices(inputs.vertices_projected)?;

        // λ
        let weights = barycentric::barycentric(
            Vector3::new(x as f32, y as f32, 0.0),
            &vertices.map(|vertex| vertex.coords),
        )?;

        // 1 / z
        let depths_inv = vertices.map(|vertex| vertex.coords.z.recip());
        let factor = barycentric::interpolate(weights, depths_inv);
        let s = barycentric::interpolate(
            weights,
            [0, 1, 2].map(|i| vertices[i].s * depths_inv[i]),
        ) / factor;
        let t = barycentric::interpolate(
            weights,
            [0, 1, 2].map(|i| vertices[i].t * depths_inv[i]),
        ) / factor;

        self.outputs.colors[pixel_index] = inputs.texture.sample(s, t);

        Ok(())
    }
}
