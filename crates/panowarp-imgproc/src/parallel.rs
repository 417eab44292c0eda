use rayon::prelude::*;
use thiserror::Error;

use panowarp_image::Image;

use crate::interpolation::CoordinateField;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0, got {0}")]
    InvalidRowStride(usize),

    /// Input and output sizes do not match.
    #[error("source and destination must have the same number of rows and columns")]
    SizeMismatch,
}

/// Controls how the per-row loops are executed.
///
/// Every strategy produces bit-identical results; only scheduling differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool and process one row per task.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Apply a function to every row of a flat buffer.
///
/// # Arguments
///
/// * `dst` - The buffer, made of consecutive rows of `stride` elements.
/// * `stride` - The number of elements per row.
/// * `strategy` - How the rows are scheduled.
/// * `op` - Called with the row index and the mutable row.
///
/// # Errors
///
/// * `stride` is zero or does not divide the buffer length.
/// * The local thread pool cannot be built.
pub fn par_iter_rows_mut<D: Send>(
    dst: &mut [D],
    stride: usize,
    strategy: ExecutionStrategy,
    op: impl Fn(usize, &mut [D]) + Send + Sync,
) -> Result<(), ParallelError> {
    if stride == 0 {
        return Err(ParallelError::InvalidRowStride(stride));
    }
    if dst.len() % stride != 0 {
        return Err(ParallelError::SizeMismatch);
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(row, chunk)| op(row, chunk));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(row, chunk)| op(row, chunk));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(stride)
                    .enumerate()
                    .for_each(|(row, chunk)| op(row, chunk));
            });
        }
    }

    Ok(())
}

/// Apply a function to each pixel for grid sampling.
///
/// `f` receives the (x, y) source coordinate stored in `field` for the pixel and the
/// destination pixel to write.
///
/// # Errors
///
/// * The destination and the field differ in size.
pub fn par_iter_rows_resample<T: Send, const C: usize>(
    dst: &mut Image<T, C>,
    field: &CoordinateField,
    strategy: ExecutionStrategy,
    f: impl Fn(f64, f64, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError> {
    if dst.size() != field.size() {
        return Err(ParallelError::SizeMismatch);
    }

    let cols = dst.cols();
    let map = field.as_slice();

    par_iter_rows_mut(dst.as_slice_mut(), C * cols, strategy, |row, dst_chunk| {
        let map_chunk = &map[row * 2 * cols..(row + 1) * 2 * cols];
        dst_chunk
            .chunks_exact_mut(C)
            .zip(map_chunk.chunks_exact(2))
            .for_each(|(dst_pixel, xy)| f(xy[0], xy[1], dst_pixel));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use panowarp_image::ImageSize;

    fn double_rows(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![1, 2, 3, 4, 5, 6];
        par_iter_rows_mut(&mut dst, 3, strategy, |row, chunk| {
            chunk.iter_mut().for_each(|v| *v = *v * 2 + row * 100);
        })?;
        Ok(dst)
    }

    #[test]
    fn test_rows_serial() -> Result<(), ParallelError> {
        assert_eq!(
            double_rows(ExecutionStrategy::Serial)?,
            vec![2, 4, 6, 108, 110, 112]
        );
        Ok(())
    }

    #[test]
    fn test_rows_parallel() -> Result<(), ParallelError> {
        assert_eq!(
            double_rows(ExecutionStrategy::ParallelRows)?,
            vec![2, 4, 6, 108, 110, 112]
        );
        Ok(())
    }

    #[test]
    fn test_rows_fixed_success() -> Result<(), ParallelError> {
        assert_eq!(
            double_rows(ExecutionStrategy::Fixed(2))?,
            vec![2, 4, 6, 108, 110, 112]
        );
        Ok(())
    }

    #[test]
    fn test_rows_fixed_error() {
        assert_eq!(
            double_rows(ExecutionStrategy::Fixed(0)),
            Err(ParallelError::InvalidThreadCount(0))
        );
    }

    #[test]
    fn test_rows_invalid_stride() {
        let mut dst = vec![0; 4];
        let res = par_iter_rows_mut(&mut dst, 0, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowStride(0)));

        let res = par_iter_rows_mut(&mut dst, 3, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::SizeMismatch));
    }

    #[test]
    fn test_resample_size_mismatch() -> Result<(), Box<dyn std::error::Error>> {
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        let field = CoordinateField::from_size_val([3, 2].into(), 0.0)?;
        let res = par_iter_rows_resample(&mut dst, &field, ExecutionStrategy::Serial, |_, _, _| {});
        assert_eq!(res, Err(ParallelError::SizeMismatch));
        Ok(())
    }
}
