//! Grid/block/thread dispatch on a single host thread.
//!
//! A launch walks every block of the grid and every thread of each block in
//! a fixed order and calls the kernel once per thread with its
//! [`LaunchIndex`]:
//!
//! ```plaintext
//! for block.z { for block.y { for block.x {
//!     for thread.z { for thread.y { for thread.x {
//!         kernel.execute(index)
//! }}}}}}
//! ```

pub mod dim;

pub use crate::error::Error;
pub use dim::*;

use std::fmt;

/// A function executed once per simulated thread.
///
/// Any `FnMut(LaunchIndex) -> Result<(), Error>` is a kernel, so the
/// arguments of a launch can be captured by a closure.
pub trait Kernel {
    fn execute(
        &mut self,
        index: LaunchIndex,
    ) -> Result<(), Error>;
}

impl<F> Kernel for F
where
    F: FnMut(LaunchIndex) -> Result<(), Error>,
{
    #[inline]
    fn execute(
        &mut self,
        index: LaunchIndex,
    ) -> Result<(), Error> {
        self(index)
    }
}

/// The outcome of a launch.
#[derive(Debug, Default)]
pub struct LaunchReport {
    /// The threads that failed. The other threads still ran.
    pub failures: Vec<ThreadFailure>,
    /// `G_x * G_y * G_z * B_x * B_y * B_z`
    pub invocation_count: u64,
}

#[derive(Debug)]
pub struct ThreadFailure {
    pub error: Error,
    pub index: LaunchIndex,
}

/// Launching the kernel over `grid_dim` blocks of `block_dim` threads.
///
/// An extent of zero on any axis launches nothing.
///
/// ## Errors
///
/// [`Error::InvalidDimension`] if any extent is negative or the thread
/// count overflows. No thread runs in that case.
///
/// Errors returned by threads do not abort the launch, they are collected
/// in [`LaunchReport::failures`].
///
/// ## Example
///
/// ```rust
/// use gridsim_renderer::grid::{launch, Dim3, LaunchIndex};
///
/// let mut values = vec![0; 6];
/// let report = launch(
///     &mut |index: LaunchIndex| {
///         values[index.global_linear() as usize] = index.thread_index.x;
///         Ok(())
///     },
///     Dim3::new(2, 1, 1),
///     Dim3::new(3, 1, 1),
/// )
/// .unwrap();
///
/// assert_eq!(report.invocation_count, 6);
/// assert_eq!(values, [0, 1, 2, 0, 1, 2]);
/// ```
pub fn launch<K: Kernel + ?Sized>(
    kernel: &mut K,
    grid_dim: Dim3,
    block_dim: Dim3,
) -> Result<LaunchReport, Error> {
    let invocation_count = grid_dim
        .validate("grid_dim")?
        .checked_mul(block_dim.validate("block_dim")?)
        .ok_or_else(|| Error::InvalidDimension {
            name: "grid_dim * block_dim",
            value: format!("{grid_dim} * {block_dim}"),
        })?;

    #[cfg(debug_assertions)]
    log::debug!(
        target: "gridsim::grid",
        "launch ({grid_dim}) x ({block_dim}) = {invocation_count} threads",
    );

    let mut report = LaunchReport {
        failures: Vec::new(),
        invocation_count,
    };

    for block_index in grid_dim.iter() {
        for thread_index in block_dim.iter() {
            let index = LaunchIndex {
                block_dim,
                block_index,
                grid_dim,
                thread_index,
            };

            if let Err(error) = kernel.execute(index) {
                log::warn!(
                    target: "gridsim::grid",
                    "thread {index} is skipped: {error}",
                );
                report.failures.push(ThreadFailure { error, index });
            }
        }
    }

    Ok(report)
}

/// Launching `kernel` with explicit `arguments`.
///
/// It is [`launch`] for kernels written as plain functions of
/// `(arguments, index)`.
pub fn launch_with<A, F>(
    mut kernel: F,
    grid_dim: Dim3,
    block_dim: Dim3,
    arguments: &mut A,
) -> Result<LaunchReport, Error>
where
    A: ?Sized,
    F: FnMut(&mut A, LaunchIndex) -> Result<(), Error>,
{
    launch(
        &mut |index: LaunchIndex| kernel(arguments, index),
        grid_dim,
        block_dim,
    )
}

impl LaunchReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for LaunchReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} threads, {} failed",
            self.invocation_count,
            self.failures.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_count() {
        let dims = [
            (Dim3::new(1, 1, 1), Dim3::new(1, 1, 1)),
            (Dim3::new(2, 3, 4), Dim3::new(5, 6, 7)),
            (Dim3::new(3, 1, 2), Dim3::new(16, 16, 1)),
            (Dim3::new(0, 3, 4), Dim3::new(5, 6, 7)),
            (Dim3::new(2, 3, 4), Dim3::new(5, 0, 7)),
        ];

        for (grid_dim, block_dim) in dims {
            let mut count = 0_u64;
            let report = launch(
                &mut |_: LaunchIndex| {
                    count += 1;
                    Ok(())
                },
                grid_dim,
                block_dim,
            )
            .unwrap();

            let target = [grid_dim, block_dim]
                .iter()
                .map(|d| (d.x * d.y * d.z) as u64)
                .product::<u64>();
            assert_eq!(count, target);
            assert_eq!(report.invocation_count, target);
            assert!(report.is_clean());
        }
    }

    #[test]
    fn order_is_z_y_x() {
        let mut indices = vec![];
        launch(
            &mut |index: LaunchIndex| {
                indices.push((index.block_index, index.thread_index));
                Ok(())
            },
            Dim3::new(2, 2, 1),
            Dim3::new(1, 2, 2),
        )
        .unwrap();

        let target = [
            ((0, 0, 0), (0, 0, 0)),
            ((0, 0, 0), (0, 1, 0)),
            ((0, 0, 0), (0, 0, 1)),
            ((0, 0, 0), (0, 1, 1)),
            ((1, 0, 0), (0, 0, 0)),
            ((1, 0, 0), (0, 1, 0)),
            ((1, 0, 0), (0, 0, 1)),
            ((1, 0, 0), (0, 1, 1)),
            ((0, 1, 0), (0, 0, 0)),
            ((0, 1, 0), (0, 1, 0)),
            ((0, 1, 0), (0, 0, 1)),
            ((0, 1, 0), (0, 1, 1)),
            ((1, 1, 0), (0, 0, 0)),
            ((1, 1, 0), (0, 1, 0)),
            ((1, 1, 0), (0, 0, 1)),
            ((1, 1, 0), (0, 1, 1)),
        ]
        .map(|(b, t)| (Index3::from(b), Index3::from(t)));
        assert_eq!(indices, target);
    }

    #[test]
    fn global_linear_covers_launch_once() {
        let grid_dim = Dim3::new(2, 3, 2);
        let block_dim = Dim3::new(4, 1, 3);
        let mut hits = vec![0; 2 * 3 * 2 * 4 * 3];

        launch(
            &mut |index: LaunchIndex| {
                hits[index.global_linear() as usize] += 1;
                Ok(())
            },
            grid_dim,
            block_dim,
        )
        .unwrap();

        assert!(hits.iter().all(|&hit| hit == 1));
    }

    #[test]
    fn negative_extent_is_rejected() {
        let mut count = 0;
        let mut kernel = |_: LaunchIndex| {
            count += 1;
            Ok(())
        };

        let error =
            launch(&mut kernel, Dim3::new(1, -1, 1), Dim3::new(4, 4, 1)).unwrap_err();
        assert!(error.is_input_invalid());

        let error =
            launch(&mut kernel, Dim3::new(1, 1, 1), Dim3::new(4, 4, -2)).unwrap_err();
        assert!(matches!(error, Error::InvalidDimension { name: "block_dim", .. }));

        assert_eq!(count, 0);
    }

    #[test]
    fn overflowing_extent_is_rejected() {
        let huge = Dim3::new(i32::MAX, i32::MAX, i32::MAX);
        let error = launch(&mut |_: LaunchIndex| Ok(()), huge, huge).unwrap_err();
        assert!(matches!(error, Error::InvalidDimension { .. }));
    }

    #[test]
    fn failing_threads_are_reported() {
        let mut values = vec![0; 8];
        let report = launch(
            &mut |index: LaunchIndex| {
                let x = index.global_x();
                if x % 3 == 0 {
                    return Err(Error::OutOfBounds {
                        x: x as i64,
                        y: 0,
                        width: 8,
                        height: 1,
                    });
                }
                values[x as usize] = 1;
                Ok(())
            },
            Dim3::new(2, 1, 1),
            Dim3::new(4, 1, 1),
        )
        .unwrap();

        assert_eq!(report.invocation_count, 8);
        assert_eq!(report.failures.len(), 3);
        assert_eq!(
            report
                .failures
                .iter()
                .map(|failure| failure.index.global_x())
                .collect::<Vec<_>>(),
            [0, 3, 6]
        );
        assert_eq!(values, [0, 1, 1, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn launch_with_arguments() {
        struct Saxpy {
            a: f32,
            x: Vec<f32>,
            y: Vec<f32>,
        }

        fn kernel_saxpy(
            arguments: &mut Saxpy,
            index: LaunchIndex,
        ) -> Result<(), Error> {
            let i = index.global_x() as usize;
            if i < arguments.y.len() {
                arguments.y[i] += arguments.a * arguments.x[i];
            }
            Ok(())
        }

        let mut arguments = Saxpy {
            a: 2.0,
            x: (0..10).map(|i| i as f32).collect(),
            y: vec![1.0; 10],
        };
        let report = launch_with(
            kernel_saxpy,
            Dim3::new(3, 1, 1),
            Dim3::new(4, 1, 1),
            &mut arguments,
        )
        .unwrap();

        assert_eq!(report.invocation_count, 12);
        assert_eq!(
            arguments.y,
            (0..10).map(|i| 1.0 + 2.0 * i as f32).collect::<Vec<_>>()
        );
    }

    #[test]
    fn launch_dyn_kernel() {
        struct Counter(u32);

        impl Kernel for Counter {
            fn execute(
                &mut self,
                _: LaunchIndex,
            ) -> Result<(), Error> {
                self.0 += 1;
                Ok(())
            }
        }

        let mut counter = Counter(0);
        let kernel: &mut dyn Kernel = &mut counter;
        launch(kernel, Dim3::new(2, 2, 2), Dim3::new(3, 1, 1)).unwrap();
        assert_eq!(counter.0, 24);
    }
}
