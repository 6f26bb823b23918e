//! Conversion between grey-level grids and packed grey pixels.
//!
//! A packed pixel is an ARGB `u32` with full alpha and equal red, green and
//! blue bytes. Grey levels are read back from the red channel.
//!
//! The filter pipeline mirrors the classic "convolve, then scale and offset,
//! then clamp" order used for sharpen and edge kernels, where the offset
//! recentres signed responses into the displayable range.
use crate::convolve::{convolve_iterated, convolve_padded, flatten, ConvolutionMode};
use crate::error::{check_len, Result};
use crate::image::{ImageF64, ImageU8, ImageView};
use crate::kernel::Kernel;
use log::debug;

const OPAQUE: u32 = 0xFF00_0000;

/// Round to the nearest integer, ties towards positive infinity
/// (`-2.5 -> -2`, `2.5 -> 3`).
///
/// Compares the fractional part against one half instead of computing
/// `floor(v + 0.5)`, whose addition can itself round up.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    let f = v.floor();
    if v - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

/// Clamp a grey level into `[0, 255]` and round it to a byte.
#[inline]
pub fn clamp_to_grey(v: f64) -> u8 {
    if v > 255.0 {
        255
    } else if v < 0.0 {
        0
    } else {
        round_half_up(v) as u8
    }
}

/// Pack a grey byte into an opaque ARGB pixel.
#[inline]
pub fn pack_grey(g: u8) -> u32 {
    let g = g as u32;
    OPAQUE | (g << 16) | (g << 8) | g
}

#[inline]
pub fn red_channel(pixel: u32) -> u8 {
    (pixel >> 16) as u8
}

/// Clamp, round and pack each grey level. Output has the same length.
pub fn grey_to_pixels(greys: &[f64]) -> Vec<u32> {
    greys.iter().map(|&g| pack_grey(clamp_to_grey(g))).collect()
}

/// Red channel of each pixel as a grey level.
pub fn pixels_to_grey(pixels: &[u32]) -> Vec<f64> {
    pixels.iter().map(|&p| red_channel(p) as f64).collect()
}

/// `round(v * scale + offset)` clamped into `[0, 255]` and packed.
#[inline]
fn rescale_to_pixel(v: f64, scale: f64, offset: f64) -> u32 {
    let g = round_half_up(v * scale + offset).clamp(0.0, 255.0);
    pack_grey(g as u8)
}

/// Same-mode convolution of a packed grey image followed by scale/offset.
///
/// Steps: red channel to grey grid, zero-filled same-size convolution,
/// `round(conv * scale + offset)`, clamp to `[0, 255]`, repack. Border
/// pixels the kernel cannot cover convolve to zero and therefore come out as
/// `clamp(round(offset))`.
pub fn filter_pixel_image(
    pixels: &[u32],
    width: usize,
    height: usize,
    kernel: &Kernel,
    scale: f64,
    offset: f64,
) -> Result<Vec<u32>> {
    check_len(pixels.len(), width, height)?;
    kernel.check_fits(width, height)?;
    debug!(
        "filter_pixel_image: {width}x{height}, kernel {}x{}, scale={scale}, offset={offset}",
        kernel.width(),
        kernel.height()
    );

    let grey = ImageF64::from_vec(width, height, pixels_to_grey(pixels))?;
    let conv = flatten(&convolve_padded(&grey, kernel)?);
    Ok(conv
        .into_iter()
        .map(|v| rescale_to_pixel(v, scale, offset))
        .collect())
}

/// Owned row-major buffer of packed grey pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u32>,
}

impl PixelBuffer {
    pub fn from_vec(w: usize, h: usize, data: Vec<u32>) -> Result<Self> {
        check_len(data.len(), w, h)?;
        Ok(Self { w, h, data })
    }

    /// Pack a grey-level grid, clamping every sample into `[0, 255]`.
    pub fn from_grey(image: &ImageF64) -> Self {
        Self {
            w: image.w,
            h: image.h,
            data: grey_to_pixels(&flatten(image)),
        }
    }

    pub fn from_view(view: &ImageU8<'_>) -> Self {
        let data = view
            .rows()
            .flat_map(|row| row.iter().map(|&g| pack_grey(g)))
            .collect();
        Self {
            w: view.w,
            h: view.h,
            data,
        }
    }

    /// Grey-level grid taken from the red channel.
    pub fn to_grey(&self) -> ImageF64 {
        ImageF64 {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: pixels_to_grey(&self.data),
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.w + x]
    }

    /// See [`filter_pixel_image`].
    pub fn filter(&self, kernel: &Kernel, scale: f64, offset: f64) -> Result<Self> {
        let data = filter_pixel_image(&self.data, self.w, self.h, kernel, scale, offset)?;
        Ok(Self {
            w: self.w,
            h: self.h,
            data,
        })
    }

    /// Convolve `iterations` times in `mode`, then apply scale/offset,
    /// clamp and repack. With one same-mode iteration this equals
    /// [`PixelBuffer::filter`]. Valid mode shrinks the result.
    pub fn filter_iterated(
        &self,
        kernel: &Kernel,
        iterations: usize,
        mode: ConvolutionMode,
        scale: f64,
        offset: f64,
    ) -> Result<Self> {
        let result = convolve_iterated(&self.to_grey(), kernel, iterations, mode)?;
        let (w, h) = (result.width(), result.height());
        let data = result
            .into_image()
            .into_vec()
            .into_iter()
            .map(|v| rescale_to_pixel(v, scale, offset))
            .collect();
        Ok(Self { w, h, data })
    }
}
