//! Owned single-channel integer grey-level grid (row-major, stride == width).
//!
//! Input to the per-term rounded convolution, which mirrors integer pixel
//! arithmetic rather than float accumulation.
use crate::error::{check_len, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageI32 {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: Vec<i32>,
}

impl ImageI32 {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    pub fn from_vec(w: usize, h: usize, data: Vec<i32>) -> Result<Self> {
        check_len(data.len(), w, h)?;
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.data[y * self.stride + x]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: i32) {
        self.data[y * self.stride + x] = v;
    }
}

impl crate::image::traits::ImageView for ImageI32 {
    type Pixel = i32;

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
    fn row(&self, y: usize) -> &[i32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[i32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
