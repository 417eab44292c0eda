#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// lens distortion models module.
pub mod calibration;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallelization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;
