//! Pixel interpolation methods for backward-mapped image transformations.
//!
//! # Interpolation Modes
//!
//! - **Bilinear**: Smooth linear interpolation between the four adjacent pixels
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//!
//! Coordinates come from a [`CoordinateField`], one (x, y) source position per
//! destination pixel, and are consumed by [`remap`] / [`resample`].

mod bilinear;
mod field;

/// Grid generation and coordinate mapping utilities.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use field::CoordinateField;
pub use interpolate::{interpolate_pixel, InterpolationMode};
pub use remap::{is_in_bounds, remap, resample};
