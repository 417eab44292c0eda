use panowarp_image::ImageSize;

use super::CoordinateField;
use crate::parallel::{self, ExecutionStrategy, ParallelError};

/// Create a coordinate field by evaluating `f` on every destination pixel.
///
/// # Arguments
///
/// * `size` - The size of the destination grid.
/// * `strategy` - How the rows are scheduled.
/// * `f` - Receives the pixel position `(x, y)` (column, row) and returns the source
///   coordinate to sample for it.
///
/// # Returns
///
/// A field of shape (size.height, size.width, 2).
///
/// # Examples
///
/// ```
/// use panowarp_imgproc::interpolation::grid::meshgrid_from_fn;
/// use panowarp_imgproc::parallel::ExecutionStrategy;
///
/// let field = meshgrid_from_fn([3, 2].into(), ExecutionStrategy::Serial, |x, y| {
///     [x as f64 + 0.5, y as f64]
/// })
/// .unwrap();
///
/// assert_eq!(field.get(1, 2), Some([2.5, 1.0]));
/// ```
pub fn meshgrid_from_fn(
    size: ImageSize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize) -> [f64; 2] + Send + Sync,
) -> Result<CoordinateField, ParallelError> {
    let mut field = CoordinateField::zeros(size);
    if size.is_empty() {
        return Ok(field);
    }

    parallel::par_iter_rows_mut(field.as_slice_mut(), 2 * size.width, strategy, |y, row| {
        row.chunks_exact_mut(2)
            .enumerate()
            .for_each(|(x, xy)| xy.copy_from_slice(&f(x, y)));
    })?;

    Ok(field)
}
