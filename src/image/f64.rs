//! Owned single-channel f64 grey-level grid in row-major layout (stride == width).
//!
//! This is the working representation for convolution. Values are unbounded
//! while filtering and only become display intensities once clamped into
//! pixels.
use crate::error::{check_len, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF64 {
    /// Image width in samples
    pub w: usize,
    /// Image height in samples
    pub h: usize,
    /// Number of f64 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl ImageF64 {
    /// Construct a zero-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap a row-major buffer, rejecting it unless it holds `w * h` samples.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Result<Self> {
        check_len(data.len(), w, h)?;
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every sample.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Build a grid from nested rows (`rows[y][x]`). Ragged rows are rejected.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, Vec::len);
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::from_vec(w, h, data)
    }

    /// Resize to `w × h` and zero every sample, reusing the allocation.
    pub fn reset(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.stride = w;
        self.data.clear();
        self.data.resize(w * h, 0.0);
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the sample at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the sample at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Consume the grid and return its row-major samples.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl crate::image::traits::ImageView for ImageF64 {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f64]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for ImageF64 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvolveError;
    use crate::image::ImageView;

    #[test]
    fn from_rows_is_row_major() {
        let img = ImageF64::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!((img.w, img.h), (3, 2));
        assert_eq!(img.get(2, 0), 3.0);
        assert_eq!(img.get(0, 1), 4.0);
        assert_eq!(img.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = ImageF64::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            ConvolveError::DimensionMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn reset_zeroes_and_resizes() {
        let mut img = ImageF64::from_fn(4, 4, |x, y| (x + y) as f64);
        img.reset(2, 3);
        assert_eq!((img.w, img.h, img.stride), (2, 3, 2));
        assert!(img.data.iter().all(|&v| v == 0.0));
        assert_eq!(img.data.len(), 6);
    }
}
