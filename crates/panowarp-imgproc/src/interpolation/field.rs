use panowarp_image::{ImageError, ImageSize};

/// Dense backward mapping from destination pixels to source coordinates.
///
/// The field has shape (height, width, 2) and is stored row-major: element `[r, c, 0]`
/// is the source x-coordinate (column) and `[r, c, 1]` the source y-coordinate (row)
/// sampled for destination pixel (r, c). Coordinates may be fractional, negative or
/// beyond the source bounds. They are kept in `f64` so the bounds test sees the exact
/// mapped value; the interpolation kernels narrow them to `f32`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateField {
    size: ImageSize,
    data: Vec<f64>,
}

impl CoordinateField {
    /// Create a field from interleaved (x, y) pairs.
    ///
    /// # Errors
    ///
    /// If `data` does not hold exactly `width * height * 2` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use panowarp_imgproc::interpolation::CoordinateField;
    ///
    /// let field = CoordinateField::new([2, 1].into(), vec![0.5, 0.0, 1.5, 0.0]).unwrap();
    /// assert_eq!(field.get(0, 1), Some([1.5, 0.0]));
    /// ```
    pub fn new(size: ImageSize, data: Vec<f64>) -> Result<Self, ImageError> {
        let expected = size.num_pixels() * 2;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }
        Ok(Self { size, data })
    }

    /// Create a field with every coordinate set to `val`.
    pub fn from_size_val(size: ImageSize, val: f64) -> Result<Self, ImageError> {
        Self::new(size, vec![val; size.num_pixels() * 2])
    }

    pub(crate) fn zeros(size: ImageSize) -> Self {
        Self {
            size,
            data: vec![0.0; size.num_pixels() * 2],
        }
    }

    /// The spatial size of the field, equal to the size of the image it produces.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of rows of the field.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of columns of the field.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The (x, y) source coordinate for destination pixel (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> Option<[f64; 2]> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let idx = (row * self.cols() + col) * 2;
        Some([self.data[idx], self.data[idx + 1]])
    }

    /// Interleaved (x, y) pairs in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_slice_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::CoordinateField;
    use panowarp_image::{ImageError, ImageSize};

    #[test]
    fn field_shape() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let field = CoordinateField::from_size_val(size, 1.0)?;
        assert_eq!(field.size(), size);
        assert_eq!(field.rows(), 2);
        assert_eq!(field.cols(), 3);
        assert_eq!(field.as_slice().len(), 12);
        assert_eq!(field.get(1, 2), Some([1.0, 1.0]));
        assert_eq!(field.get(2, 0), None);
        assert_eq!(field.get(0, 3), None);
        Ok(())
    }

    #[test]
    fn field_wrong_length() {
        let res = CoordinateField::new([2, 2].into(), vec![0.0; 7]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(7, 8)));
    }
}
