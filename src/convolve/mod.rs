//! Direct 2D convolution of grey-level grids.
//!
//! Layers, leaf first:
//! - [`point`]: weighted sum of one kernel-sized neighbourhood.
//! - [`grid`]: point convolution over every fully supported position, either
//!   shrinking the output (`Valid`) or zero-filling it back to the input size
//!   (`Same`).
//! - [`iterate`]: repeated grid convolution with double-buffered storage.
//!
//! The kernel is not flipped: output `(x, y)` is
//! `Σ input(x + i, y + j) · kernel(i, j)`, i.e. cross-correlation in signal
//! processing terms.
//!
//! `Same` mode does not pad the input. Positions the kernel cannot fully cover
//! are set to zero, so a same-size output has a zero border of width
//! `kernel.width() / 2` on the left (and `(kernel.width() - 1) / 2` on the
//! right), likewise vertically. Edge replication or reflection is not offered.

pub mod grid;
pub mod iterate;
pub mod point;

use serde::{Deserialize, Serialize};

pub use self::grid::{
    convolve, convolve_into, convolve_padded, convolve_padded_flat, convolve_padded_into,
    convolve_valid, convolve_valid_flat, convolve_valid_into, convolve_valid_rounded, flatten,
};
pub use self::iterate::{convolve_iterated, supported_iterations, Iterated};
pub use self::point::{point_convolve, point_convolve_rounded};

/// Output geometry of a grid convolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvolutionMode {
    /// Only fully supported positions; output shrinks by `kernel - 1`.
    Valid,
    /// Output keeps the input size; unsupported positions are zero.
    #[default]
    Same,
}
