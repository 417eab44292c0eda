use panowarp_image::ImageSize;

/// lens distortion module.
pub mod distortion;

/// Represents the instrinsic parameters of a pinhole camera
///
/// # Fields
///
/// * `fx` - The focal length in the x direction
/// * `fy` - The focal length in the y direction
/// * `cx` - The x coordinate of the principal point
/// * `cy` - The y coordinate of the principal point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsic {
    /// The focal length in the x direction
    pub fx: f64,
    /// The focal length in the y direction
    pub fy: f64,
    /// The x coordinate of the principal point
    pub cx: f64,
    /// The y coordinate of the principal point
    pub cy: f64,
}

impl CameraIntrinsic {
    /// Square-pixel camera with its principal point at `(width / 2, height / 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use panowarp_imgproc::calibration::CameraIntrinsic;
    ///
    /// let k = CameraIntrinsic::centered([640, 480].into(), 500.0);
    /// assert_eq!((k.cx, k.cy), (320.0, 240.0));
    /// ```
    pub fn centered(size: ImageSize, focal_length: f64) -> Self {
        Self {
            fx: focal_length,
            fy: focal_length,
            cx: 0.5 * size.width as f64,
            cy: 0.5 * size.height as f64,
        }
    }

    /// Map a pixel to normalized image coordinates.
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.cx) / self.fx, (y - self.cy) / self.fy)
    }

    /// Map normalized image coordinates back to a pixel.
    pub fn denormalize(&self, x: f64, y: f64) -> (f64, f64) {
        (self.cx + x * self.fx, self.cy + y * self.fy)
    }
}

#[cfg(test)]
mod tests {
    use super::CameraIntrinsic;

    #[test]
    fn normalize_denormalize() {
        let k = CameraIntrinsic::centered([8, 4].into(), 2.0);
        assert_eq!(k.normalize(4.0, 2.0), (0.0, 0.0));
        assert_eq!(k.normalize(6.0, 0.0), (1.0, -1.0));
        assert_eq!(k.denormalize(1.0, -1.0), (6.0, 0.0));
    }
}
