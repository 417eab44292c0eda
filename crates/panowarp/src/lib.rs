#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use panowarp_image as image;

#[doc(inline)]
pub use panowarp_imgproc as imgproc;
