use panowarp_image::{Image, ImageDtype};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = (u.round() as usize).min(cols - 1);
    let iv = (v.round() as usize).min(rows - 1);

    let base = (iv * cols + iu) * C;

    let mut pixel = [0.0; C];
    for (dst, &src) in pixel.iter_mut().zip(&image.as_slice()[base..base + C]) {
        *dst = src.into();
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::nearest_neighbor_interpolation;
    use panowarp_image::{Image, ImageError};

    #[test]
    fn nearest_rounds_to_closest() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4])?;
        assert_eq!(nearest_neighbor_interpolation(&image, 0.4, 0.4), [1.0]);
        assert_eq!(nearest_neighbor_interpolation(&image, 0.6, 0.2), [2.0]);
        assert_eq!(nearest_neighbor_interpolation(&image, 0.2, 0.9), [3.0]);
        assert_eq!(nearest_neighbor_interpolation(&image, 1.0, 1.0), [4.0]);
        Ok(())
    }
}
