//! Rasterizing a triangle into the depth and tag buffers.

pub use super::*;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Arguments {
    /// `B_y`
    pub bounding_box_height: u32,
    /// `B_x`
    pub bounding_box_width: u32,
    /// `b_x`
    pub bounding_box_x: u32,
    /// `b_y`
    pub bounding_box_y: u32,
    /// `I_y`
    pub image_height: u32,
    /// `I_x`
    pub image_width: u32,
    /// The triangle index written to the tag buffer.
    pub tag: i32,
}

#[derive(Clone, Copy, Debug)]
pub struct Inputs<'a> {
    /// `[3]`
    ///
    /// The projected positions, `(x, y, depth)`.
    pub positions: &'a [Vector3; 3],
}

#[derive(Debug)]
pub struct Outputs<'a> {
    /// `[I_y, I_x]`
    pub depths: &'a mut [f32],
    /// `[I_y, I_x]`
    pub tags: &'a mut [i32],
}

/// The pixels a triangle can cover, clamped to the image.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct BoundingBox {
    pub height: u32,
    pub width: u32,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug)]
pub struct TriangleKernel<'a> {
    pub arguments: Arguments,
    pub inputs: Inputs<'a>,
    pub outputs: Outputs<'a>,
}

impl BoundingBox {
    /// The box from `floor(min)` to `ceil(max)` of the positions, inclusive
    /// and clamped to the image.
    ///
    /// It is `None` if the triangle is entirely outside of the image or any
    /// coordinate is not finite.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use gridsim_renderer::{render::kernel::triangle::BoundingBox, scene::Vector3};
    ///
    /// let positions = [
    ///     Vector3::new(1.5, 2.0, 1.0),
    ///     Vector3::new(6.2, 2.5, 1.0),
    ///     Vector3::new(1.5, 4.1, 1.0),
    /// ];
    /// let output = BoundingBox::covering(&positions, 100, 100).unwrap();
    /// assert_eq!((output.x, output.y, output.width, output.height), (1, 2, 7, 4));
    ///
    /// assert!(BoundingBox::covering(&positions, 1, 100).is_none());
    /// ```
    pub fn covering(
        positions: &[Vector3; 3],
        image_width: u32,
        image_height: u32,
    ) -> Option<Self> {
        if image_width == 0 || image_height == 0 {
            return None;
        }

        let xs = positions.map(|p| p.x);
        let ys = positions.map(|p| p.y);
        if !xs.iter().chain(&ys).all(|c| c.is_finite()) {
            return None;
        }

        let x_min = xs.iter().copied().fold(f32::INFINITY, f32::min).floor();
        let x_max = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max).ceil();
        let y_min = ys.iter().copied().fold(f32::INFINITY, f32::min).floor();
        let y_max = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max).ceil();

        let x_last = (image_width - 1) as f32;
        let y_last = (image_height - 1) as f32;
        if x_max < 0.0 || y_max < 0.0 || x_min > x_last || y_min > y_last {
            return None;
        }

        let x = x_min.max(0.0) as u32;
        let y = y_min.max(0.0) as u32;
        let x_end = x_max.min(x_last) as u32;
        let y_end = y_max.min(y_last) as u32;

        Some(Self {
            height: y_end - y + 1,
            width: x_end - x + 1,
            x,
            y,
        })
    }

    /// `B_x * B_y`
    #[inline]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Rasterizing the triangle over its bounding box.
///
/// For each pixel `(x, y)` in the box:
///
/// 1. Compute the barycentric weights `λ` of `(x, y)` with
///    [`barycentric::barycentric`].
///
/// 2. Skip the pixel if any weight is negative. Pixels on the edges and
///    vertices are covered.
///
/// 3. Interpolate the depth `z = Σ λᵢ zᵢ`.
///
/// 4. Write the depth and the tag if the pixel is empty or `z` is
///    smaller than its depth.
///
/// The nearest triangle wins regardless of the order of launches.
pub fn main(
    arguments: Arguments,
    inputs: Inputs<'_>,
    outputs: Outputs<'_>,
) -> Result<LaunchReport, Error> {
    let pixel_count =
        arguments.image_width as usize * arguments.image_height as usize;
    check_length("depths", outputs.depths, pixel_count)?;
    check_length("tags", outputs.tags, pixel_count)?;

    let grid_dim = grid_dim_image(
        arguments.bounding_box_width,
        arguments.bounding_box_height,
    );

    launch(
        &mut TriangleKernel {
            arguments,
            inputs,
            outputs,
        },
        grid_dim,
        BLOCK_DIM_IMAGE,
    )
}

impl Kernel for TriangleKernel<'_> {
    fn execute(
        &mut self,
        index: LaunchIndex,
    ) -> Result<(), Error> {
        let arguments = &self.arguments;
        let Some((x, y)) = pixel_of(
            &index,
            arguments.bounding_box_width,
            arguments.bounding_box_height,
        ) else {
            return Ok(());
        };

        let x = arguments.bounding_box_x as u64 + x as u64;
        let y = arguments.bounding_box_y as u64 + y as u64;
        if x >= arguments.image_width as u64 || y >= arguments.image_height as u64
        {
            return Err(Error::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: arguments.image_width,
                height: arguments.image_height,
            });
        }

        // λ
        let weights = barycentric::barycentric(
            Vector3::new(x as f32, y as f32, 0.0),
            self.inputs.positions,
        )?;
        if !barycentric::is_inside(weights) {
            return Ok(());
        }

        // z
        let depth = barycentric::interpolate(
            weights,
            self.inputs.positions.map(|position| position.z),
        );

        let pixel_index = y as usize * arguments.image_width as usize + x as usize;
        let tag = &mut self.outputs.tags[pixel_index];
        let depth_current = &mut self.outputs.depths[pixel_index];
        if *tag == TAG_EMPTY || depth < *depth_current {
            *tag = arguments.tag;
            *depth_current = depth;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasterize(
        positions: &[Vector3; 3],
        tag: i32,
        image_width: u32,
        image_height: u32,
        depths: &mut [f32],
        tags: &mut [i32],
    ) -> LaunchReport {
        let bounding_box =
            BoundingBox::covering(positions, image_width, image_height).unwrap();
        main(
            Arguments {
                bounding_box_height: bounding_box.height,
                bounding_box_width: bounding_box.width,
                bounding_box_x: bounding_box.x,
                bounding_box_y: bounding_box.y,
                image_height,
                image_width,
                tag,
            },
            Inputs { positions },
            Outputs { depths, tags },
        )
        .unwrap()
    }

    #[test]
    fn bounding_box_clamped() {
        let positions = [
            Vector3::new(-3.5, -1.0, 1.0),
            Vector3::new(12.2, 2.0, 1.0),
            Vector3::new(0.0, 7.9, 1.0),
        ];
        let output = BoundingBox::covering(&positions, 10, 5).unwrap();
        let target = BoundingBox {
            height: 5,
            width: 10,
            x: 0,
            y: 0,
        };
        assert_eq!(output, target);
        assert_eq!(output.pixel_count(), 50);
    }

    #[test]
    fn bounding_box_off_frame() {
        let positions = [
            Vector3::new(-9.0, 1.0, 1.0),
            Vector3::new(-4.0, 2.0, 1.0),
            Vector3::new(-5.0, 3.0, 1.0),
        ];
        assert_eq!(BoundingBox::covering(&positions, 10, 10), None);

        let positions = [
            Vector3::new(1.0, 10.5, 1.0),
            Vector3::new(4.0, 12.0, 1.0),
            Vector3::new(5.0, 13.0, 1.0),
        ];
        assert_eq!(BoundingBox::covering(&positions, 10, 10), None);

        let positions = [
            Vector3::new(1.0, f32::NAN, 1.0),
            Vector3::new(4.0, 2.0, 1.0),
            Vector3::new(5.0, 3.0, 1.0),
        ];
        assert_eq!(BoundingBox::covering(&positions, 10, 10), None);
        assert_eq!(BoundingBox::covering(&positions, 0, 10), None);
    }

    #[test]
    fn rasterize_right_triangle() {
        let positions = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(4.0, 0.0, 1.0),
            Vector3::new(0.0, 4.0, 1.0),
        ];
        let mut depths = vec![DEPTH_CLEAR; 25];
        let mut tags = vec![TAG_EMPTY; 25];

        let report = rasterize(&positions, 0, 5, 5, &mut depths, &mut tags);
        assert!(report.is_clean());
        assert_eq!(report.invocation_count, (BLOCK_SIZE_X * BLOCK_SIZE_Y) as u64);

        let covered = tags.iter().filter(|&&tag| tag == 0).count();
        assert_eq!(covered, 15);

        for y in 0..5 {
            for x in 0..5 {
                let target = if x + y <= 4 { 0 } else { TAG_EMPTY };
                assert_eq!(tags[y * 5 + x], target, "({x}, {y})");
                if target == 0 {
                    assert_eq!(depths[y * 5 + x], 1.0, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn rasterize_vertices_of_odd_triangle() {
        let positions = [
            Vector3::new(41.0, 34.0, 1.0),
            Vector3::new(39.0, 17.0, 1.0),
            Vector3::new(46.0, 60.0, 1.0),
        ];
        let mut depths = vec![DEPTH_CLEAR; 64 * 64];
        let mut tags = vec![TAG_EMPTY; 64 * 64];

        let report = rasterize(&positions, 0, 64, 64, &mut depths, &mut tags);
        assert!(report.is_clean());

        for position in positions {
            let pixel_index = position.y as usize * 64 + position.x as usize;
            assert_eq!(tags[pixel_index], 0, "{position:?}");
            assert_eq!(depths[pixel_index], 1.0, "{position:?}");
        }
    }

    #[test]
    fn split_parallelograms_have_no_holes() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x3D65);
        let mut count = 0;

        while count < 300 {
            let o = (rng.gen_range(16..48_i64), rng.gen_range(16..48_i64));
            let u = (rng.gen_range(-15..=15_i64), rng.gen_range(-15..=15_i64));
            let v = (rng.gen_range(-15..=15_i64), rng.gen_range(-15..=15_i64));
            // cross(u, v)
            let area = u.0 * v.1 - u.1 * v.0;
            if area == 0 {
                continue;
            }
            count += 1;

            let corner = |a: i64, b: i64| {
                Vector3::new(
                    (o.0 + a * u.0 + b * v.0) as f32,
                    (o.1 + a * u.1 + b * v.1) as f32,
                    1.0,
                )
            };
            let (c00, c10, c11, c01) =
                (corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1));

            let mut depths = vec![DEPTH_CLEAR; 64 * 64];
            let mut tags = vec![TAG_EMPTY; 64 * 64];
            rasterize(&[c00, c10, c11], 0, 64, 64, &mut depths, &mut tags);
            rasterize(&[c00, c11, c01], 1, 64, 64, &mut depths, &mut tags);

            for y in 0..64_i64 {
                for x in 0..64_i64 {
                    let d = (x - o.0, y - o.1);
                    // a * area = cross(d, v), b * area = cross(u, d)
                    let a = d.0 * v.1 - d.1 * v.0;
                    let b = u.0 * d.1 - u.1 * d.0;
                    let inside = if area > 0 {
                        (0..=area).contains(&a) && (0..=area).contains(&b)
                    } else {
                        (area..=0).contains(&a) && (area..=0).contains(&b)
                    };
                    if inside {
                        assert_ne!(
                            tags[(y * 64 + x) as usize],
                            TAG_EMPTY,
                            "({x}, {y}) in {c00:?} {c10:?} {c11:?} {c01:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn depth_test_is_order_independent() {
        let near = [
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(8.0, 0.0, 2.0),
            Vector3::new(0.0, 8.0, 2.0),
        ];
        let far = [
            Vector3::new(2.0, 2.0, 5.0),
            Vector3::new(10.0, 2.0, 5.0),
            Vector3::new(2.0, 10.0, 5.0),
        ];
        let (tag_near, tag_far) = (3, 8);

        let mut outputs = vec![];
        for order in [
            [(near, tag_near), (far, tag_far)],
            [(far, tag_far), (near, tag_near)],
        ] {
            let mut depths = vec![DEPTH_CLEAR; 64];
            let mut tags = vec![TAG_EMPTY; 64];
            for (positions, tag) in order {
                rasterize(&positions, tag, 8, 8, &mut depths, &mut tags);
            }
            outputs.push((depths, tags));
        }

        assert_eq!(outputs[0], outputs[1]);

        let (depths, tags) = &outputs[0];
        // Covered by both
        assert_eq!(tags[3 * 8 + 3], tag_near);
        assert_eq!(depths[3 * 8 + 3], 2.0);
        // Covered by the near one only
        assert_eq!(tags[6 * 8 + 1], tag_near);
        assert_eq!(depths[6 * 8 + 1], 2.0);
        // Covered by the far one only
        assert_eq!(tags[5 * 8 + 6], tag_far);
        assert_eq!(depths[5 * 8 + 6], 5.0);
        // Covered by none
        assert_eq!(tags[7 * 8 + 7], TAG_EMPTY);
        assert_eq!(depths[7 * 8 + 7], DEPTH_CLEAR);
    }

    #[test]
    fn depth_tie_keeps_first() {
        let positions = [
            Vector3::new(0.0, 0.0, 3.0),
            Vector3::new(4.0, 0.0, 3.0),
            Vector3::new(0.0, 4.0, 3.0),
        ];
        let mut depths = vec![DEPTH_CLEAR; 25];
        let mut tags = vec![TAG_EMPTY; 25];

        rasterize(&positions, 1, 5, 5, &mut depths, &mut tags);
        rasterize(&positions, 2, 5, 5, &mut depths, &mut tags);

        assert!(tags.iter().all(|&tag| tag == 1 || tag == TAG_EMPTY));
        assert_eq!(tags.iter().filter(|&&tag| tag == 1).count(), 15);
    }

    #[test]
    fn pixel_outside_image_is_reported() {
        let positions = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(4.0, 0.0, 1.0),
            Vector3::new(0.0, 4.0, 1.0),
        ];
        let mut depths = vec![DEPTH_CLEAR; 9];
        let mut tags = vec![TAG_EMPTY; 9];

        // A box exceeding the 3x3 image
        let report = main(
            Arguments {
                bounding_box_height: 3,
                bounding_box_width: 4,
                bounding_box_x: 0,
                bounding_box_y: 0,
                image_height: 3,
                image_width: 3,
                tag: 0,
            },
            Inputs {
                positions: &positions,
            },
            Outputs {
                depths: &mut depths,
                tags: &mut tags,
            },
        )
        .unwrap();

        assert_eq!(report.failures.len(), 3);
        assert!(report
            .failures
            .iter()
            .all(|failure| matches!(failure.error, Error::OutOfBounds { x: 3, .. })));
        assert_eq!(tags.iter().filter(|&&tag| tag == 0).count(), 9);
    }
}
