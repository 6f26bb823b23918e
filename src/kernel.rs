//! Convolution kernels.
//!
//! A [`Kernel`] is a small rectangular grid of weights stored row-major.
//! `at(i, j)` addresses column `i` and row `j`, so a kernel anchored at image
//! position `(x, y)` weights sample `(x + i, y + j)`. Weights need not be
//! normalised.
use crate::error::{check_len, ConvolveError, Result};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    w: usize,
    h: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from row-major weights. Both dimensions must be
    /// non-zero and `weights.len()` must equal `w * h`.
    pub fn new(w: usize, h: usize, weights: Vec<f64>) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(ConvolveError::InvalidKernelSize {
                kernel_width: w,
                kernel_height: h,
                image: None,
            });
        }
        check_len(weights.len(), w, h)?;
        Ok(Self { w, h, weights })
    }

    /// Build a kernel from nested rows (`rows[j][i]`).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, Vec::len);
        let weights: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(w, h, weights)
    }

    /// Single-cell kernel of weight 1.
    pub fn identity() -> Self {
        Self {
            w: 1,
            h: 1,
            weights: vec![1.0],
        }
    }

    /// Normalised averaging kernel of size `w × h`.
    pub fn box_blur(w: usize, h: usize) -> Result<Self> {
        let n = (w * h) as f64;
        Self::new(w, h, vec![1.0 / n; w * h])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Weight at column `i`, row `j`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.weights[j * self.w + i]
    }

    /// Sum of all weights; 1 for normalised smoothing kernels.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Reject the kernel unless it fits inside a `width × height` image.
    pub fn check_fits(&self, width: usize, height: usize) -> Result<()> {
        if self.w > width || self.h > height {
            return Err(ConvolveError::InvalidKernelSize {
                kernel_width: self.w,
                kernel_height: self.h,
                image: Some((width, height)),
            });
        }
        Ok(())
    }

    /// Output dimensions of a valid-mode convolution over `width × height`.
    pub fn valid_dims(&self, width: usize, height: usize) -> Result<(usize, usize)> {
        self.check_fits(width, height)?;
        Ok((width - self.w + 1, height - self.h + 1))
    }

    /// Offset at which valid-mode output lands in a same-size result.
    #[inline]
    pub fn anchor(&self) -> (usize, usize) {
        (self.w / 2, self.h / 2)
    }
}

/// Commonly used 3×3 filters, selectable by name in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelPreset {
    Identity,
    BoxBlur,
    Sharpen,
    Edge,
    Emboss,
    SobelX,
    SobelY,
}

impl KernelPreset {
    pub fn kernel(self) -> Kernel {
        let weights: [f64; 9] = match self {
            KernelPreset::Identity => return Kernel::identity(),
            KernelPreset::BoxBlur => [1.0 / 9.0; 9],
            KernelPreset::Sharpen => [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
            KernelPreset::Edge => [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
            KernelPreset::Emboss => [-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0],
            KernelPreset::SobelX => [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
            KernelPreset::SobelY => [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        };
        Kernel {
            w: 3,
            h: 3,
            weights: weights.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_is_column_then_row() {
        let k = Kernel::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!((k.width(), k.height()), (2, 3));
        assert_eq!(k.at(1, 0), 2.0);
        assert_eq!(k.at(0, 2), 5.0);
        assert_eq!(k.anchor(), (1, 1));
    }

    #[test]
    fn empty_kernel_is_rejected() {
        assert_eq!(
            Kernel::new(0, 3, vec![]),
            Err(ConvolveError::InvalidKernelSize {
                kernel_width: 0,
                kernel_height: 3,
                image: None
            })
        );
        assert!(matches!(
            Kernel::new(2, 2, vec![1.0; 3]),
            Err(ConvolveError::DimensionMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn valid_dims_shrink_by_kernel_extent() {
        let k = Kernel::box_blur(3, 2).unwrap();
        assert_eq!(k.valid_dims(10, 5).unwrap(), (8, 4));
        assert_eq!(k.valid_dims(3, 2).unwrap(), (1, 1));
        assert_eq!(
            k.valid_dims(2, 5),
            Err(ConvolveError::InvalidKernelSize {
                kernel_width: 3,
                kernel_height: 2,
                image: Some((2, 5))
            })
        );
    }

    #[test]
    fn smoothing_presets_are_normalised() {
        assert!((KernelPreset::BoxBlur.kernel().sum() - 1.0).abs() < 1e-12);
        assert_eq!(KernelPreset::Sharpen.kernel().sum(), 1.0);
        assert_eq!(KernelPreset::Edge.kernel().sum(), 0.0);
        assert_eq!(KernelPreset::Identity.kernel(), Kernel::identity());
    }

    #[test]
    fn preset_names_deserialize() {
        let p: KernelPreset = serde_json::from_str("\"sobel_x\"").unwrap();
        assert_eq!(p, KernelPreset::SobelX);
    }
}
