#![doc = include_str!("../README.md")]

// Public modules
pub mod convolve;
pub mod error;
pub mod image;
pub mod kernel;
pub mod pixel;

// Configuration for the demo binaries.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::convolve::{
    convolve, convolve_iterated, convolve_padded, convolve_valid, point_convolve,
    point_convolve_rounded, ConvolutionMode, Iterated,
};
pub use crate::error::{ConvolveError, Result};
pub use crate::image::{ImageF64, ImageI32};
pub use crate::kernel::{Kernel, KernelPreset};
pub use crate::pixel::{filter_pixel_image, grey_to_pixels, pixels_to_grey, PixelBuffer};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use grey_conv::prelude::*;
///
/// let img = ImageF64::from_fn(4, 4, |_, _| 1.0);
/// let kernel = Kernel::new(2, 2, vec![1.0; 4]).unwrap();
/// let out = convolve_valid(&img, &kernel).unwrap();
/// assert_eq!((out.w, out.h), (3, 3));
/// assert!(out.data.iter().all(|&v| v == 4.0));
/// ```
pub mod prelude {
    pub use crate::convolve::{convolve_iterated, convolve_padded, convolve_valid};
    pub use crate::image::ImageF64;
    pub use crate::{ConvolutionMode, ConvolveError, Kernel, KernelPreset, PixelBuffer};
}
