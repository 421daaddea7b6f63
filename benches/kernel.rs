use divan::Bencher;
use gridsim_renderer::{
    function::matrix::{self, Matrix3},
    grid::{launch, Dim3, LaunchIndex},
    render::{Renderer, RendererOptions},
    scene::{Camera, Scene},
};

fn main() {
    divan::main();
}

mod grid {
    use super::*;

    #[divan::bench(sample_count = 100, sample_size = 1)]
    fn launch_empty(bencher: Bencher) {
        bencher.bench_local(|| {
            let mut count = 0_u64;
            let report = launch(
                &mut |index: LaunchIndex| {
                    count += index.global_linear() & 1;
                    Ok(())
                },
                Dim3::new(50, 50, 1),
                Dim3::new(16, 16, 1),
            );
            report.map(|_| count)
        });
    }
}

mod function {
    use super::*;

    #[divan::bench(sample_count = 100, sample_size = 2)]
    fn matrix_invert(bencher: Bencher) {
        bencher
            .with_inputs(data::random_matrices())
            .bench_local_refs(|matrices| {
                matrices
                    .iter()
                    .filter_map(|m| matrix::invert(m).ok())
                    .count()
            });
    }
}

mod render {
    use super::*;

    #[divan::bench(sample_count = 20, sample_size = 1)]
    fn cube_frame(bencher: Bencher) {
        let scene = Scene::cube();
        let options = RendererOptions::default();
        let camera =
            Camera::perspective(options.image_width, options.image_height, 150.0);
        let mut renderer = Renderer::new(options);
        let mut frame_index = 0;

        bencher.bench_local(|| {
            frame_index += 1;
            renderer
                .render(&scene, &camera, &Scene::cube_rotation(frame_index, 300))
                .map(|frame| frame.report.invocation_count)
        });
    }

    #[divan::bench(sample_count = 20, sample_size = 1)]
    fn cube_frame_post(bencher: Bencher) {
        let scene = Scene::cube();
        let options = RendererOptions::default().with_post_threshold(Some(0.1));
        let camera =
            Camera::perspective(options.image_width, options.image_height, 150.0);
        let mut renderer = Renderer::new(options);
        let mut frame_index = 0;

        bencher.bench_local(|| {
            frame_index += 1;
            renderer
                .render(&scene, &camera, &Scene::cube_rotation(frame_index, 300))
                .map(|frame| frame.report.invocation_count)
        });
    }

    #[divan::bench(sample_count = 20, sample_size = 1)]
    fn to_rgb8(bencher: Bencher) {
        let scene = Scene::cube();
        let options = RendererOptions::default();
        let camera =
            Camera::perspective(options.image_width, options.image_height, 150.0);
        let mut renderer = Renderer::new(options);
        let frame = renderer
            .render(&scene, &camera, &Scene::cube_rotation(0, 300))
            .unwrap();

        bencher.bench_local(|| frame.to_rgb8());
    }
}

mod data {
    use super::*;
    use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};

    const SIZE: usize = 1 << 16;

    pub fn random_matrices() -> impl FnMut() -> Vec<Matrix3> {
        || {
            let mut rng = StdRng::seed_from_u64(0x3D65);
            let distribution = Uniform::new_inclusive(-100.0_f32, 100.0);
            (0..SIZE)
                .map(|_| [(); 3].map(|_| [(); 3].map(|_| rng.sample(distribution))))
                .collect()
        }
    }
}
