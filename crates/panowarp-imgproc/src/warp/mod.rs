//! Geometric image transformations for panorama stitching.
//!
//! The spherical warp reprojects a rectilinear image onto the inside of a sphere so that
//! neighbouring frames of a panorama can be aligned by pure translation.
//!
//! # Examples
//!
//! ```no_run
//! use panowarp_image::Image;
//! use panowarp_imgproc::warp::{warp_spherical, DEFAULT_K1, DEFAULT_K2};
//!
//! let image = Image::<u8, 3>::from_size_val([640, 480].into(), 0).unwrap();
//! let warped = warp_spherical(&image, 595.0, DEFAULT_K1, DEFAULT_K2).unwrap();
//! assert_eq!(warped.size(), image.size());
//! ```

mod spherical;

pub use spherical::{
    compute_spherical_mapping, warp_spherical, SphericalWarp, SphericalWarpConfig, DEFAULT_K1,
    DEFAULT_K2,
};

use panowarp_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the warp and remap operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The focal length is not a positive finite number of pixels.
    #[error("focal length must be positive and finite, got {0}")]
    InvalidFocalLength(f64),

    /// A radial distortion coefficient is not finite.
    #[error("distortion coefficients must be finite, got k1={0}, k2={1}")]
    InvalidDistortion(f64, f64),

    /// The image or grid has no pixels.
    #[error("image size must be non-zero, got {0}x{1}")]
    InvalidImageSize(usize, usize),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error while scheduling the per-row work.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
