/// Two-coefficient radial distortion.
///
/// The distortion scales a normalized point by `1 + k1 * r^2 + k2 * r^4`, with `r` the
/// distance to the optical center.
///
/// # Fields
///
/// * `k1` - The first radial distortion coefficient
/// * `k2` - The second radial distortion coefficient
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialDistortion {
    /// The first radial distortion coefficient
    pub k1: f64,
    /// The second radial distortion coefficient
    pub k2: f64,
}

impl RadialDistortion {
    /// Create a radial distortion from its two coefficients.
    pub fn new(k1: f64, k2: f64) -> Self {
        Self { k1, k2 }
    }

    /// Whether both coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.k1.is_finite() && self.k2.is_finite()
    }

    /// Radial scale factor for a squared radius.
    pub fn factor(&self, r2: f64) -> f64 {
        let r4 = r2 * r2;
        1.0 + self.k1 * r2 + self.k2 * r4
    }
}

/// Distort a point in normalized image coordinates
///
/// # Arguments
///
/// * `x` - The normalized x coordinate of the point
/// * `y` - The normalized y coordinate of the point
/// * `distortion` - The distortion parameters of the camera
///
/// # Returns
///
/// The distorted normalized point `(x, y)`.
///
/// # Examples
///
/// ```
/// use panowarp_imgproc::calibration::distortion::{distort_point_radial, RadialDistortion};
///
/// let (x, y) = distort_point_radial(0.0, 0.0, &RadialDistortion::new(-0.21, 0.26));
/// assert_eq!((x, y), (0.0, 0.0));
/// ```
pub fn distort_point_radial(x: f64, y: f64, distortion: &RadialDistortion) -> (f64, f64) {
    let r2 = x * x + y * y;
    let k = distortion.factor(r2);
    (x * k, y * k)
}
