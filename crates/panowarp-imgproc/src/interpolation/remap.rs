use crate::parallel::{self, ExecutionStrategy};
use crate::warp::WarpError;

use super::interpolate::interpolate_pixel;
use super::{CoordinateField, InterpolationMode};
use panowarp_image::{Image, ImageDtype, ImageError, ImageSize};

/// Whether a source coordinate can be sampled from an image of the given size.
///
/// The valid range is the closed interval `[0, width - 1] x [0, height - 1]`; NaN
/// coordinates are never in bounds.
pub fn is_in_bounds(x: f64, y: f64, size: ImageSize) -> bool {
    if size.is_empty() {
        return false;
    }
    let max_x = (size.width - 1) as f64;
    let max_y = (size.height - 1) as f64;
    (0.0..=max_x).contains(&x) && (0.0..=max_y).contains(&y)
}

/// Resample an image through a backward coordinate field.
///
/// Every destination pixel (r, c) reads the source at `field[r, c]`. Coordinates outside
/// the source (see [`is_in_bounds`], evaluated on the `f64` field values) produce zero in
/// every channel. Results are written back with [`ImageDtype::from_f32`], which rounds and
/// saturates integer types.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container with the same size as `field`.
/// * `field` - The source coordinate of every destination pixel.
/// * `interpolation` - The interpolation mode to use.
/// * `strategy` - How the rows are scheduled.
///
/// # Errors
///
/// * The source image is empty.
/// * The output image does not have the same size as the field.
pub fn remap<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    field: &CoordinateField,
    interpolation: InterpolationMode,
    strategy: ExecutionStrategy,
) -> Result<(), WarpError> {
    let src_size = src.size();
    if src_size.is_empty() {
        return Err(WarpError::InvalidImageSize(src_size.width, src_size.height));
    }

    if dst.size() != field.size() {
        return Err(ImageError::InvalidImageSize(
            field.cols(),
            field.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    if dst.size().is_empty() {
        return Ok(());
    }

    if log::log_enabled!(log::Level::Trace) {
        let masked = field
            .as_slice()
            .chunks_exact(2)
            .filter(|xy| !is_in_bounds(xy[0], xy[1], src_size))
            .count();
        log::trace!(
            "remap: {} of {} destination pixels fall outside the {} source",
            masked,
            field.size().num_pixels(),
            src_size
        );
    }

    parallel::par_iter_rows_resample(dst, field, strategy, |x, y, dst_pixel| {
        if is_in_bounds(x, y, src_size) {
            let pixel = interpolate_pixel(src, x as f32, y as f32, interpolation);
            dst_pixel
                .iter_mut()
                .zip(pixel.iter())
                .for_each(|(out, &val)| *out = T::from_f32(val));
        } else {
            dst_pixel.iter_mut().for_each(|out| *out = T::default());
        }
    })?;

    Ok(())
}

/// Resample an image through a coordinate field with bilinear interpolation.
///
/// The output has the spatial size of `field` and the channel count of `src`.
///
/// # Examples
///
/// ```
/// use panowarp_image::Image;
/// use panowarp_imgproc::interpolation::{resample, CoordinateField};
///
/// let src = Image::<u8, 1>::new([2, 1].into(), vec![0, 100]).unwrap();
/// let field = CoordinateField::new([2, 1].into(), vec![0.5, 0.0, 2.0, 0.0]).unwrap();
///
/// let dst = resample(&src, &field).unwrap();
/// assert_eq!(dst.as_slice(), &[50, 0]);
/// ```
pub fn resample<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    field: &CoordinateField,
) -> Result<Image<T, C>, WarpError> {
    let mut dst = Image::from_size_val(field.size(), T::default())?;
    remap(
        src,
        &mut dst,
        field,
        InterpolationMode::Bilinear,
        ExecutionStrategy::default(),
    )?;
    Ok(dst)
}
