//! Rendering a frame by launching the kernels in order.

pub mod arena;
pub mod export;
pub mod kernel;

pub use crate::{
    error::Error,
    grid::{LaunchReport, ThreadFailure},
    preset::render::*,
    scene::*,
};
pub use arena::*;

use crate::function::barycentric;
use kernel::{pixel, post, triangle, vertex};
use std::fmt;

/// Options of [`Renderer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RendererOptions {
    /// The color of uncovered pixels.
    pub background: Vector3,
    /// `I_y`
    pub image_height: u32,
    /// `I_x`
    pub image_width: u32,
    /// The edge threshold of the post-process kernel.
    ///
    /// The post-process kernel is not launched if it is `None`.
    pub post_threshold: Option<f32>,
}

/// Renders scenes into a reusable [`FrameArena`].
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    pub arena: FrameArena,
    pub options: RendererOptions,
}

/// A rendered frame borrowing the buffers of its [`Renderer`].
#[derive(Debug)]
pub struct Frame<'a> {
    /// `[I_y, I_x]`
    pub colors: &'a [Vector3],
    /// `[I_y, I_x]`
    pub depths: &'a [f32],
    /// `I_y`
    pub image_height: u32,
    /// `I_x`
    pub image_width: u32,
    pub report: FrameReport,
    /// `[I_y, I_x]`
    pub tags: &'a [i32],
}

/// What happened while rendering a frame.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// The number of kernel invocations of every launch.
    pub invocation_count: u64,
    /// The threads that failed in any launch.
    pub thread_failures: Vec<ThreadFailure>,
    /// Triangles entirely outside of the image.
    pub triangles_culled: usize,
    /// Triangles launched over their bounding boxes.
    pub triangles_rasterized: usize,
    /// Triangles that could not be rasterized.
    pub triangles_skipped: Vec<TriangleSkip>,
}

#[derive(Debug)]
pub struct TriangleSkip {
    pub error: Error,
    /// The position in [`Scene::triangles`].
    pub index: usize,
}

impl RendererOptions {
    #[inline]
    pub fn with_background(
        mut self,
        background: Vector3,
    ) -> Self {
        self.background = background;
        self
    }

    #[inline]
    pub fn with_image_size(
        mut self,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        self.image_width = image_width;
        self.image_height = image_height;
        self
    }

    #[inline]
    pub fn with_post_threshold(
        mut self,
        post_threshold: Option<f32>,
    ) -> Self {
        self.post_threshold = post_threshold;
        self
    }
}

impl Default for RendererOptions {
    #[inline]
    fn default() -> Self {
        Self {
            background: COLOR_BACKGROUND.into(),
            image_height: IMAGE_HEIGHT,
            image_width: IMAGE_WIDTH,
            post_threshold: None,
        }
    }
}

impl Renderer {
    pub fn new(options: RendererOptions) -> Self {
        Self {
            arena: FrameArena::new(),
            options,
        }
    }

    /// Rendering `scene` rotated by `rotation` through `camera`.
    ///
    /// The frame runs these launches in order:
    ///
    /// 1. [`vertex`] over all vertices.
    /// 2. [`triangle`] over the bounding box of each triangle, in
    ///    ascending index.
    /// 3. [`pixel`] over the image.
    /// 4. [`post`] over the image if
    ///    [`post_threshold`](RendererOptions::post_threshold) is set.
    ///
    /// ## Errors
    ///
    /// The frame is aborted for a zero-sized image, a singular camera
    /// basis or too many triangles to tag. A triangle with invalid
    /// indices, a vertex behind the camera or no area is skipped and
    /// recorded in [`FrameReport::triangles_skipped`].
    ///
    /// ## Example
    ///
    /// ```rust
    /// use gridsim_renderer::{render::*, scene::*};
    ///
    /// let mut renderer = Renderer::new(RendererOptions::default().with_image_size(64, 64));
    /// let camera = Camera::perspective(64, 64, 12.0);
    /// let frame = renderer
    ///     .render(&Scene::cube(), &camera, &Scene::cube_rotation(0, 300))
    ///     .unwrap();
    ///
    /// assert_eq!(frame.colors.len(), 64 * 64);
    /// assert!(frame.report.triangles_skipped.is_empty());
    /// ```
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        rotation: &Rotation,
    ) -> Result<Frame<'_>, Error> {
        #[cfg(debug_assertions)]
        log::debug!(target: "gridsim::render", "start");

        // Specifying the arguments

        let options = self.options;
        // I_x
        let image_width = options.image_width;
        // I_y
        let image_height = options.image_height;
        // V
        let vertex_count = scene.vertices.len();
        // T
        let triangle_count = scene.triangles.len();

        if image_width == 0 || image_height == 0 {
            return Err(Error::InvalidFrameSize(image_width, image_height));
        }
        let vertex_count_u32 =
            u32::try_from(vertex_count).map_err(|_| Error::InvalidDimension {
                name: "vertex_count",
                value: vertex_count.to_string(),
            })?;
        if i32::try_from(triangle_count).is_err() {
            return Err(Error::InvalidTriangleIndex {
                index: triangle_count as i64,
                count: i32::MAX as usize,
            });
        }

        // P⁻¹
        let projection_inverse = camera.projection_inverse()?;

        let arena = &mut self.arena;
        arena.reset(image_width, image_height, vertex_count, options.background);
        let mut report = FrameReport::default();

        // Launching the kernels

        let report_vertex = vertex::main(
            vertex::Arguments {
                projection_inverse,
                rotation_angle: rotation.angle,
                rotation_axis: rotation.axis.to_array(),
                rotation_origin: rotation.origin.to_array(),
                vertex_count: vertex_count_u32,
                view_position: camera.position.to_array(),
            },
            vertex::Inputs {
                vertices: &scene.vertices,
            },
            vertex::Outputs {
                vertices_projected: &mut arena.vertices_projected,
                vertices_transformed: &mut arena.vertices_transformed,
                view_depths: &mut arena.view_depths,
            },
        )?;
        report.merge(report_vertex);
        #[cfg(debug_assertions)]
        log::debug!(target: "gridsim::render", "vertex");

        for (index, triangle) in scene.triangles.iter().enumerate() {
            let positions = match Self::triangle_positions(triangle, arena) {
                Ok(positions) => positions,
                Err(error) => {
                    report.skip(index, error);
                    continue;
                },
            };
            if let Err(error) = barycentric::double_area(&positions) {
                report.skip(index, error);
                continue;
            }
            let Some(bounding_box) = triangle::BoundingBox::covering(
                &positions,
                image_width,
                image_height,
            ) else {
                report.triangles_culled += 1;
                continue;
            };

            let report_triangle = triangle::main(
                triangle::Arguments {
                    bounding_box_height: bounding_box.height,
                    bounding_box_width: bounding_box.width,
                    bounding_box_x: bounding_box.x,
                    bounding_box_y: bounding_box.y,
                    image_height,
                    image_width,
                    tag: index as i32,
                },
                triangle::Inputs {
                    positions: &positions,
                },
                triangle::Outputs {
                    depths: &mut arena.depths,
                    tags: &mut arena.tags,
                },
            )?;
            report.merge(report_triangle);
            report.triangles_rasterized += 1;
        }
        #[cfg(debug_assertions)]
        log::debug!(target: "gridsim::render", "triangle");

        let report_pixel = pixel::main(
            pixel::Arguments {
                image_height,
                image_width,
            },
            pixel::Inputs {
                tags: &arena.tags,
                texture: &scene.texture,
                triangles: &scene.triangles,
                vertices_projected: &arena.vertices_projected,
            },
            pixel::Outputs {
                colors: &mut arena.colors,
            },
        )?;
        report.merge(report_pixel);
        #[cfg(debug_assertions)]
        log::debug!(target: "gridsim::render", "pixel");

        if let Some(threshold) = options.post_threshold {
            arena.snapshot_colors();
            let report_post = post::main(
                post::Arguments {
                    image_height,
                    image_width,
                    threshold,
                },
                post::Inputs {
                    colors: &arena.colors_previous,
                    depths: &arena.depths,
                },
                post::Outputs {
                    colors: &mut arena.colors,
                },
            )?;
            report.merge(report_post);
            #[cfg(debug_assertions)]
            log::debug!(target: "gridsim::render", "post");
        }

        log::debug!(target: "gridsim::render", "{report}");

        Ok(Frame {
            colors: &arena.colors,
            depths: &arena.depths,
            image_height,
            image_width,
            report,
            tags: &arena.tags,
        })
    }

    /// The projected positions of the triangle's vertices.
    fn triangle_positions(
        triangle: &Triangle,
        arena: &FrameArena,
    ) -> Result<[Vector3; 3], Error> {
        triangle.validate(arena.vertex_count())?;

        let indices = triangle.indices().map(|index| index as usize);
        if let Some(&depth) = indices
            .iter()
            .map(|&index| &arena.view_depths[index])
            .find(|&&depth| depth.is_nan() || depth <= DETERMINANT_EPSILON)
        {
            return Err(Error::BehindCamera { depth });
        }

        Ok(indices.map(|index| arena.vertices_projected[index].coords))
    }
}

impl Frame<'_> {
    /// `I_x * I_y`
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// The color at `(x, y)`.
    #[inline]
    pub fn color(
        &self,
        x: u32,
        y: u32,
    ) -> Option<Vector3> {
        (x < self.image_width && y < self.image_height).then(|| {
            self.colors[y as usize * self.image_width as usize + x as usize]
        })
    }

    /// The tag at `(x, y)`.
    #[inline]
    pub fn tag(
        &self,
        x: u32,
        y: u32,
    ) -> Option<i32> {
        (x < self.image_width && y < self.image_height).then(|| {
            self.tags[y as usize * self.image_width as usize + x as usize]
        })
    }
}

impl FrameReport {
    /// Returns `true` if nothing failed or was skipped.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.thread_failures.is_empty() && self.triangles_skipped.is_empty()
    }

    fn merge(
        &mut self,
        report: LaunchReport,
    ) {
        self.invocation_count += report.invocation_count;
        self.thread_failures.extend(report.failures);
    }

    fn skip(
        &mut self,
        index: usize,
        error: Error,
    ) {
        log::warn!(
            target: "gridsim::render",
            "triangle {index} is skipped: {error}",
        );
        self.triangles_skipped.push(TriangleSkip { error, index });
    }
}

impl fmt::Display for FrameReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} threads ({} failed), {} triangles rasterized, {} culled, {} skipped",
            self.invocation_count,
            self.thread_failures.len(),
            self.triangles_rasterized,
            self.triangles_culled,
            self.triangles_skipped.len(),
        )
    }
}
