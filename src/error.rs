//! Error type shared by all convolution and pixel operations.
//!
//! Every failure is a local precondition violation detected before any
//! output is produced; there is no partial result to recover.

/// Reasons a convolution call may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvolveError {
    /// The kernel is empty or does not fit inside the image.
    InvalidKernelSize {
        kernel_width: usize,
        kernel_height: usize,
        /// Image the kernel was checked against; `None` for an empty kernel.
        image: Option<(usize, usize)>,
    },
    /// A flat buffer does not hold exactly `width * height` samples.
    DimensionMismatch { expected: usize, found: usize },
    /// Repeated valid-mode convolution would shrink the image away before
    /// all requested iterations complete.
    NonPositiveIterationBound {
        iterations: usize,
        /// Number of iterations that fit before the image becomes smaller
        /// than the kernel.
        supported: usize,
    },
}

impl std::fmt::Display for ConvolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvolveError::InvalidKernelSize {
                kernel_width,
                kernel_height,
                image: Some((image_width, image_height)),
            } => write!(
                f,
                "invalid kernel size {kernel_width}x{kernel_height} for image {image_width}x{image_height}"
            ),
            ConvolveError::InvalidKernelSize {
                kernel_width,
                kernel_height,
                image: None,
            } => write!(f, "empty kernel {kernel_width}x{kernel_height}"),
            ConvolveError::DimensionMismatch { expected, found } => {
                write!(f, "buffer length mismatch (expected {expected}, found {found})")
            }
            ConvolveError::NonPositiveIterationBound {
                iterations,
                supported,
            } => write!(
                f,
                "{iterations} valid-mode iterations requested but only {supported} fit the image"
            ),
        }
    }
}

impl std::error::Error for ConvolveError {}

pub type Result<T> = std::result::Result<T, ConvolveError>;

/// Check that a flat buffer holds exactly `w * h` samples.
pub(crate) fn check_len(len: usize, w: usize, h: usize) -> Result<()> {
    let expected = w * h;
    if len != expected {
        return Err(ConvolveError::DimensionMismatch {
            expected,
            found: len,
        });
    }
    Ok(())
}
