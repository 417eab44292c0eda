use panowarp_image::{Image, ImageDtype, ImageSize};

use super::WarpError;
use crate::calibration::distortion::{distort_point_radial, RadialDistortion};
use crate::calibration::CameraIntrinsic;
use crate::interpolation::{grid::meshgrid_from_fn, remap, CoordinateField, InterpolationMode};
use crate::parallel::ExecutionStrategy;

/// Default first radial distortion coefficient.
pub const DEFAULT_K1: f64 = -0.21;

/// Default second radial distortion coefficient.
pub const DEFAULT_K2: f64 = 0.26;

// Angles of the sphere direction that anchors the vertical offset of the projection.
const REFERENCE_THETA: f64 = 0.0;
const REFERENCE_PHI: f64 = 0.0;

/// Unit vector on the sphere for longitude `theta` and latitude `phi`.
fn sphere_direction(theta: f64, phi: f64) -> [f64; 3] {
    [theta.sin() * phi.cos(), phi.sin(), theta.cos() * phi.cos()]
}

/// Vertical offset subtracted from every latitude.
///
/// It evaluates to `sin(0) = 0` for this projection model.
fn min_y() -> f64 {
    sphere_direction(REFERENCE_THETA, REFERENCE_PHI)[1]
}

/// Project spherical angles to a distorted source pixel.
///
/// The direction is intersected with the z = 1 plane and the result goes through the
/// radial distortion before being scaled back to pixels. Singular at `theta` or `phi`
/// equal to +-pi/2, where the coordinates become infinite or NaN.
fn spherical_to_pixel(
    theta: f64,
    phi: f64,
    intrinsic: &CameraIntrinsic,
    distortion: &RadialDistortion,
) -> (f64, f64) {
    let [dx, dy, dz] = sphere_direction(theta, phi);
    let (xn, yn) = (dx / dz, dy / dz);
    let (xt, yt) = distort_point_radial(xn, yn, distortion);
    intrinsic.denormalize(xt, yt)
}

/// Parameters of the spherical warp.
///
/// # Examples
///
/// ```
/// use panowarp_imgproc::parallel::ExecutionStrategy;
/// use panowarp_imgproc::warp::SphericalWarpConfig;
///
/// let config = SphericalWarpConfig::new(500.0)
///     .with_distortion(-0.1, 0.05)
///     .with_strategy(ExecutionStrategy::Serial);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.distortion.k1, -0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SphericalWarpConfig {
    /// Focal length in pixels.
    pub focal_length: f64,
    /// Radial distortion applied after the back-projection.
    pub distortion: RadialDistortion,
    /// Interpolation used when sampling the source image.
    pub interpolation: InterpolationMode,
    /// Scheduling of the per-row loops.
    pub strategy: ExecutionStrategy,
}

impl SphericalWarpConfig {
    /// Config with the given focal length and the default coefficients
    /// ([`DEFAULT_K1`], [`DEFAULT_K2`]), bilinear sampling and row parallelism.
    pub fn new(focal_length: f64) -> Self {
        Self {
            focal_length,
            distortion: RadialDistortion::new(DEFAULT_K1, DEFAULT_K2),
            interpolation: InterpolationMode::Bilinear,
            strategy: ExecutionStrategy::default(),
        }
    }

    /// Replace the radial distortion coefficients.
    pub fn with_distortion(mut self, k1: f64, k2: f64) -> Self {
        self.distortion = RadialDistortion::new(k1, k2);
        self
    }

    /// Replace the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replace the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// * The focal length is not finite or not strictly positive.
    /// * A distortion coefficient is not finite.
    pub fn validate(&self) -> Result<(), WarpError> {
        if !self.focal_length.is_finite() || self.focal_length <= 0.0 {
            return Err(WarpError::InvalidFocalLength(self.focal_length));
        }
        if !self.distortion.is_finite() {
            return Err(WarpError::InvalidDistortion(
                self.distortion.k1,
                self.distortion.k2,
            ));
        }
        Ok(())
    }
}

/// A validated spherical warp.
///
/// The coordinate field depends only on the output size and the config, so a caller
/// warping many frames of the same size can build it once with [`SphericalWarp::mapping`]
/// and feed it to [`remap`] for every frame.
#[derive(Debug, Clone)]
pub struct SphericalWarp {
    config: SphericalWarpConfig,
}

impl SphericalWarp {
    /// Create a warp after validating its config.
    pub fn new(config: SphericalWarpConfig) -> Result<Self, WarpError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The config of the warp.
    pub fn config(&self) -> &SphericalWarpConfig {
        &self.config
    }

    /// Compute the source coordinate of every pixel of an output image of `size`.
    ///
    /// # Errors
    ///
    /// * `size` has no pixels.
    /// * The execution strategy cannot be honoured.
    pub fn mapping(&self, size: ImageSize) -> Result<CoordinateField, WarpError> {
        if size.is_empty() {
            return Err(WarpError::InvalidImageSize(size.width, size.height));
        }

        log::debug!(
            "spherical mapping: {}, f={}, k1={}, k2={}, {:?}",
            size,
            self.config.focal_length,
            self.config.distortion.k1,
            self.config.distortion.k2,
            self.config.strategy
        );

        let intrinsic = CameraIntrinsic::centered(size, self.config.focal_length);
        let distortion = self.config.distortion;
        let min_y = min_y();

        let field = meshgrid_from_fn(size, self.config.strategy, |x, y| {
            let (theta, phi) = intrinsic.normalize(x as f64, y as f64);
            let (u, v) = spherical_to_pixel(theta, phi - min_y, &intrinsic, &distortion);
            [u, v]
        })?;

        Ok(field)
    }

    /// Warp an image onto the sphere. The output has the size of the input.
    ///
    /// # Errors
    ///
    /// * The input image is empty.
    /// * The execution strategy cannot be honoured.
    pub fn warp<T: ImageDtype, const C: usize>(
        &self,
        src: &Image<T, C>,
    ) -> Result<Image<T, C>, WarpError> {
        let field = self.mapping(src.size())?;
        let mut dst = Image::from_size_val(src.size(), T::default())?;
        remap(
            src,
            &mut dst,
            &field,
            self.config.interpolation,
            self.config.strategy,
        )?;
        Ok(dst)
    }
}

/// Compute the spherical warp coordinate field.
///
/// For every output pixel (r, c) the field holds the (x, y) source pixel to sample:
///
/// ```text
/// theta = (c - width / 2) / f
/// phi   = (r - height / 2) / f - min_y
/// (xn, yn) = (sin(theta) cos(phi), sin(phi)) / (cos(theta) cos(phi))
/// (xt, yt) = (xn, yn) * (1 + k1 r^2 + k2 r^4),   r^2 = xn^2 + yn^2
/// (x, y)   = (width / 2 + xt f, height / 2 + yt f)
/// ```
///
/// # Arguments
///
/// * `size` - The size of the output image.
/// * `focal_length` - The focal length in pixels.
/// * `k1` - The first radial distortion coefficient.
/// * `k2` - The second radial distortion coefficient.
///
/// # Errors
///
/// * `size` has no pixels, `focal_length` is not positive or a coefficient is not finite.
///
/// # Examples
///
/// ```
/// use panowarp_imgproc::warp::compute_spherical_mapping;
///
/// let field = compute_spherical_mapping([8, 6].into(), 100.0, 0.0, 0.0).unwrap();
/// assert_eq!(field.rows(), 6);
/// assert_eq!(field.cols(), 8);
/// assert_eq!(field.get(3, 4), Some([4.0, 3.0]));
/// ```
pub fn compute_spherical_mapping(
    size: ImageSize,
    focal_length: f64,
    k1: f64,
    k2: f64,
) -> Result<CoordinateField, WarpError> {
    let config = SphericalWarpConfig::new(focal_length).with_distortion(k1, k2);
    SphericalWarp::new(config)?.mapping(size)
}

/// Warp an image onto the sphere with bilinear sampling.
///
/// Chains [`compute_spherical_mapping`] for the size of `src` and the masked resampling;
/// pixels whose source coordinate falls outside `src` are zero.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, C).
/// * `focal_length` - The focal length in pixels.
/// * `k1` - The first radial distortion coefficient, usually [`DEFAULT_K1`].
/// * `k2` - The second radial distortion coefficient, usually [`DEFAULT_K2`].
///
/// # Returns
///
/// The warped image, with the size and channel count of `src`.
pub fn warp_spherical<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    focal_length: f64,
    k1: f64,
    k2: f64,
) -> Result<Image<T, C>, WarpError> {
    let config = SphericalWarpConfig::new(focal_length).with_distortion(k1, k2);
    SphericalWarp::new(config)?.warp(src)
}
