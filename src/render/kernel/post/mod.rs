//! Smoothing the colors across depth edges.

pub use super::*;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Arguments {
    /// `I_y`
    pub image_height: u32,
    /// `I_x`
    pub image_width: u32,
    /// `ε_e`, the relative depth difference that makes an edge.
    pub threshold: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Inputs<'a> {
    /// `[I_y, I_x]`
    ///
    /// It is read instead of [`Outputs::colors`], so the result does not
    /// depend on the order of threads.
    pub colors: &'a [Vector3],
    /// `[I_y, I_x]`
    pub depths: &'a [f32],
}

#[derive(Debug)]
pub struct Outputs<'a> {
    /// `[I_y, I_x]`
    pub colors: &'a mut [Vector3],
}

#[derive(Debug)]
pub struct PostKernel<'a> {
    pub arguments: Arguments,
    pub inputs: Inputs<'a>,
    pub outputs: Outputs<'a>,
}

/// Offsets of the 3x3 neighbourhood without the center.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Smoothing the colors across depth edges.
///
/// For each pixel `c`:
///
/// 1. Find the edge strength over the neighbours `n` in the image:
/// ```plaintext
/// e = max |z_n - z_c| / max(|z_c|, ε)
/// ```
///
/// 2. Skip the pixel if `e` is not above the threshold or any of the four
///    direct neighbours is outside of the image.
///
/// 3. Compare the color gradients:
/// ```plaintext
/// g_v = Σ |C_up - C_down|
/// g_h = Σ |C_right - C_left|
/// ```
///
/// 4. Blend each channel toward the mean of the pair with the smaller
///    gradient, weighted by the difference of the pair clamped to `[0, 1]`.
///    The pair is `(up, down)` if `g_h >= g_v`, otherwise `(left, right)`.
pub fn main(
    arguments: Arguments,
    inputs: Inputs<'_>,
    outputs: Outputs<'_>,
) -> Result<LaunchReport, Error> {
    let pixel_count =
        arguments.image_width as usize * arguments.image_height as usize;
    check_length("colors_previous", inputs.colors, pixel_count)?;
    check_length("depths", inputs.depths, pixel_count)?;
    check_length("colors", outputs.colors, pixel_count)?;

    launch(
        &mut PostKernel {
            arguments,
            inputs,
            outputs,
        },
        grid_dim_image(arguments.image_width, arguments.image_height),
        BLOCK_DIM_IMAGE,
    )
}

impl PostKernel<'_> {
    /// The index of the pixel at `(x + dx, y + dy)` if it is in the image.
    #[inline]
    fn neighbor(
        &self,
        x: u32,
        y: u32,
        (dx, dy): (i32, i32),
    ) -> Option<usize> {
        let x = x.checked_add_signed(dx)?;
        let y = y.checked_add_signed(dy)?;
        let width = self.arguments.image_width;
        (x < width && y < self.arguments.image_height)
            .then(|| y as usize * width as usize + x as usize)
    }
}

impl Kernel for PostKernel<'_> {
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
        let center = y as usize * arguments.image_width as usize + x as usize;

        // e
        let depth = inputs.depths[center];
        let depth_scale = depth.abs().max(DETERMINANT_EPSILON);
        let strength = NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(|offset| self.neighbor(x, y, offset))
            .map(|neighbor| (inputs.depths[neighbor] - depth).abs() / depth_scale)
            .fold(0.0, f32::max);
        if strength <= arguments.threshold {
            return Ok(());
        }

        let (Some(up), Some(down), Some(left), Some(right)) = (
            self.neighbor(x, y, (0, -1)),
            self.neighbor(x, y, (0, 1)),
            self.neighbor(x, y, (-1, 0)),
            self.neighbor(x, y, (1, 0)),
        ) else {
            return Ok(());
        };

        let colors = inputs.colors;
        // g_v
        let gradient_vertical = (colors[up] - colors[down]).abs_sum();
        // g_h
        let gradient_horizontal = (colors[right] - colors[left]).abs_sum();

        let (a, b) = if gradient_horizontal >= gradient_vertical {
            (colors[up], colors[down])
        } else {
            (colors[left], colors[right])
        };
        let weight = (a - b).abs();
        let mean = (a + b) * 0.5;
        let color = colors[center];
        let color = color
            + (mean - color)
                * Vector3::new(
                    weight.x.min(1.0),
                    weight.y.min(1.0),
                    weight.z.min(1.0),
                );

        self.outputs.colors[center] = color;

        Ok(())
    }
}
