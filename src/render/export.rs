//! Frame export implementation.

pub use super::*;

use rayon::prelude::*;
use std::io::{BufWriter, Write};

/// Frame exporters
impl Frame<'_> {
    /// Converting the colors to 8-bit RGB.
    ///
    /// Each channel `c` becomes `floor(c * 255 + 0.5)` clamped to `0 ~ 255`.
    /// The bytes are in row-major order, three bytes per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.colors
            .par_iter()
            .flat_map_iter(|color| color.to_array().map(to_u8))
            .collect()
    }

    /// Export the frame in the plain-text PPM (`P3`) format.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use gridsim_renderer::{render::*, scene::*};
    ///
    /// let mut renderer = Renderer::new(RendererOptions::default().with_image_size(2, 1));
    /// let scene = Scene {
    ///     texture: Texture::new(1, 1, vec![Vector3::ZERO]).unwrap(),
    ///     triangles: vec![],
    ///     vertices: vec![],
    /// };
    /// let frame = renderer
    ///     .render(&scene, &Camera::perspective(2, 1, 1.0), &Rotation::NONE)
    ///     .unwrap();
    ///
    /// let mut output = vec![];
    /// frame.encode_ppm(&mut output).unwrap();
    /// assert_eq!(output, b"P3\n2 1\n255\n153 153 153\n153 153 153\n");
    /// ```
    pub fn encode_ppm(
        &self,
        writer: &mut impl Write,
    ) -> Result<(), Error> {
        let writer = &mut BufWriter::new(writer);

        write!(writer, "P3\n{} {}\n255\n", self.image_width, self.image_height)?;
        for rgb in self.to_rgb8().chunks_exact(3) {
            writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        }
        writer.flush()?;

        Ok(())
    }
}

/// `floor(c * 255 + 0.5)` clamped to `0 ~ 255`
///
/// `NaN` becomes `0`.
#[inline]
pub fn to_u8(channel: f32) -> u8 {
    (channel * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}
