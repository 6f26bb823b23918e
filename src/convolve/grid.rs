//! Grid convolution in valid and same (zero-filled) modes.
use super::point::{point_convolve, point_convolve_rounded};
use super::ConvolutionMode;
use crate::error::Result;
use crate::image::{ImageF64, ImageI32, ImageView, ImageViewMut};
use crate::kernel::Kernel;

/// Convolve over every fully supported position.
///
/// Output is `(w - kw + 1) × (h - kh + 1)`. Fails with `InvalidKernelSize`
/// if the kernel does not fit the image.
pub fn convolve_valid(input: &ImageF64, kernel: &Kernel) -> Result<ImageF64> {
    let mut out = ImageF64::new(0, 0);
    convolve_valid_into(input, kernel, &mut out)?;
    Ok(out)
}

/// [`convolve_valid`] writing into `out`, which is resized as needed.
pub fn convolve_valid_into<I>(input: &I, kernel: &Kernel, out: &mut ImageF64) -> Result<()>
where
    I: ImageView<Pixel = f64>,
{
    let (sw, sh) = kernel.valid_dims(input.width(), input.height())?;
    out.reset(sw, sh);
    for y in 0..sh {
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            *px = point_convolve(input, x, y, kernel);
        }
    }
    Ok(())
}

/// Convolve and keep the input size.
///
/// The valid-mode result lands at offset `kernel.anchor()`; every other
/// sample is zero. The input itself is never padded.
pub fn convolve_padded(input: &ImageF64, kernel: &Kernel) -> Result<ImageF64> {
    let mut out = ImageF64::new(0, 0);
    convolve_padded_into(input, kernel, &mut out)?;
    Ok(out)
}

/// [`convolve_padded`] writing into `out`, which is resized as needed.
pub fn convolve_padded_into<I>(input: &I, kernel: &Kernel, out: &mut ImageF64) -> Result<()>
where
    I: ImageView<Pixel = f64>,
{
    let (w, h) = (input.width(), input.height());
    let (sw, sh) = kernel.valid_dims(w, h)?;
    let (left, top) = kernel.anchor();
    out.reset(w, h);
    for y in 0..sh {
        let dst = &mut out.row_mut(y + top)[left..left + sw];
        for (x, px) in dst.iter_mut().enumerate() {
            *px = point_convolve(input, x, y, kernel);
        }
    }
    Ok(())
}

/// Dispatch on `mode`.
pub fn convolve(input: &ImageF64, kernel: &Kernel, mode: ConvolutionMode) -> Result<ImageF64> {
    let mut out = ImageF64::new(0, 0);
    convolve_into(input, kernel, mode, &mut out)?;
    Ok(out)
}

pub fn convolve_into<I>(
    input: &I,
    kernel: &Kernel,
    mode: ConvolutionMode,
    out: &mut ImageF64,
) -> Result<()>
where
    I: ImageView<Pixel = f64>,
{
    match mode {
        ConvolutionMode::Valid => convolve_valid_into(input, kernel, out),
        ConvolutionMode::Same => convolve_padded_into(input, kernel, out),
    }
}

/// Valid-mode convolution of an integer grid using per-term rounding.
pub fn convolve_valid_rounded(input: &ImageI32, kernel: &Kernel) -> Result<ImageI32> {
    let (sw, sh) = kernel.valid_dims(input.w, input.h)?;
    let mut out = ImageI32::new(sw, sh);
    for y in 0..sh {
        for x in 0..sw {
            out.set(x, y, point_convolve_rounded(input, x, y, kernel));
        }
    }
    Ok(out)
}

/// Row-major copy of a grid: element `y * width + x` holds sample `(x, y)`.
pub fn flatten<I: ImageView>(image: &I) -> Vec<I::Pixel> {
    if let Some(slice) = image.as_slice() {
        return slice.to_vec();
    }
    let mut out = Vec::with_capacity(image.width() * image.height());
    for row in image.rows() {
        out.extend_from_slice(row);
    }
    out
}

/// [`convolve_valid`] returned as a flat row-major buffer.
pub fn convolve_valid_flat(input: &ImageF64, kernel: &Kernel) -> Result<Vec<f64>> {
    convolve_valid(input, kernel).map(ImageF64::into_vec)
}

/// [`convolve_padded`] returned as a flat row-major buffer of `w * h` samples.
pub fn convolve_padded_flat(input: &ImageF64, kernel: &Kernel) -> Result<Vec<f64>> {
    convolve_padded(input, kernel).map(ImageF64::into_vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvolveError;
    use crate::image::ImageU8;

    fn ramp(w: usize, h: usize) -> ImageF64 {
        ImageF64::from_fn(w, h, |x, y| (y * w + x) as f64)
    }

    #[test]
    fn valid_mode_shrinks_output() {
        let img = ramp(5, 4);
        let k = Kernel::box_blur(3, 2).unwrap();
        let out = convolve_valid(&img, &k).unwrap();
        assert_eq!((out.w, out.h), (3, 3));
    }

    #[test]
    fn horizontal_difference_kernel() {
        let img = ramp(4, 3);
        let k = Kernel::new(2, 1, vec![-1.0, 1.0]).unwrap();
        let out = convolve_valid(&img, &k).unwrap();
        assert_eq!((out.w, out.h), (3, 3));
        assert!(out.data.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn padded_mode_places_result_at_anchor() {
        let img = ImageF64::from_fn(5, 5, |_, _| 2.0);
        let k = Kernel::box_blur(3, 3).unwrap();
        let out = convolve_padded(&img, &k).unwrap();
        assert_eq!((out.w, out.h), (5, 5));
        for y in 0..5 {
            for x in 0..5 {
                let inside = (1..4).contains(&x) && (1..4).contains(&y);
                if inside {
                    assert!((out.get(x, y) - 2.0).abs() < 1e-12);
                } else {
                    assert_eq!(out.get(x, y), 0.0, "border ({x}, {y}) must be zero");
                }
            }
        }
    }

    #[test]
    fn padded_mode_even_kernel_leaves_no_right_border() {
        let img = ImageF64::from_fn(4, 4, |_, _| 1.0);
        let k = Kernel::new(2, 2, vec![1.0; 4]).unwrap();
        let out = convolve_padded(&img, &k).unwrap();
        assert_eq!(out.row(0), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(out.row(3), &[0.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn into_variants_reuse_destination() {
        let img = ramp(6, 6);
        let k = Kernel::box_blur(3, 3).unwrap();
        let mut out = ImageF64::from_fn(10, 10, |_, _| 7.0);
        convolve_valid_into(&img, &k, &mut out).unwrap();
        assert_eq!((out.w, out.h), (4, 4));
        convolve_padded_into(&img, &k, &mut out).unwrap();
        assert_eq!((out.w, out.h), (6, 6));
        assert_eq!(out.get(0, 0), 0.0);
    }

    #[test]
    fn oversized_kernel_is_rejected() {
        let img = ramp(3, 3);
        let k = Kernel::box_blur(4, 1).unwrap();
        let err = convolve_padded(&img, &k).unwrap_err();
        assert!(matches!(err, ConvolveError::InvalidKernelSize { .. }));
    }

    #[test]
    fn rounded_grid_matches_float_for_integer_weights() {
        let ints = ImageI32::from_vec(3, 3, (1..=9).collect()).unwrap();
        let k = Kernel::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let out = convolve_valid_rounded(&ints, &k).unwrap();
        let floats = ImageF64::from_fn(3, 3, |x, y| ints.get(x, y) as f64);
        let expected = convolve_valid(&floats, &k).unwrap();
        for (a, b) in out.data.iter().zip(expected.data.iter()) {
            assert_eq!(*a as f64, *b);
        }
    }

    #[test]
    fn flatten_respects_stride() {
        let data = [1u8, 2, 0, 3, 4, 0];
        let view = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            data: &data,
        };
        assert_eq!(flatten(&view), vec![1, 2, 3, 4]);
    }
}
