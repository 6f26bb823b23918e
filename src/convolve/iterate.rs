//! Repeated application of a grid convolution.
//!
//! Iteration `k + 1` reads exactly what iteration `k` wrote. Two buffers are
//! swapped between iterations so no grid is cloned inside the loop.
use super::grid::convolve_into;
use super::ConvolutionMode;
use crate::error::{ConvolveError, Result};
use crate::image::ImageF64;
use crate::kernel::Kernel;
use log::{debug, trace};

/// Result of [`convolve_iterated`].
#[derive(Clone, Debug, PartialEq)]
pub struct Iterated {
    /// Output of the final iteration (or the input itself for zero iterations).
    pub image: ImageF64,
    /// Number of convolutions applied.
    pub iterations: usize,
}

impl Iterated {
    pub fn width(&self) -> usize {
        self.image.w
    }

    pub fn height(&self) -> usize {
        self.image.h
    }

    pub fn into_image(self) -> ImageF64 {
        self.image
    }
}

/// Number of valid-mode iterations a `width × height` image supports before
/// it becomes smaller than `kernel`. `None` means unbounded (1×1 kernel).
pub fn supported_iterations(width: usize, height: usize, kernel: &Kernel) -> Option<usize> {
    let bound = |extent: usize, k: usize| {
        let shrink = k - 1;
        if shrink == 0 {
            None
        } else if extent < k {
            Some(0)
        } else {
            Some((extent - 1) / shrink)
        }
    };
    match (
        bound(width, kernel.width()),
        bound(height, kernel.height()),
    ) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

/// Apply `kernel` `iterations` times, feeding each output back as input.
///
/// - `iterations == 0` returns the input unchanged.
/// - `Valid` mode shrinks the grid by `kernel - 1` per iteration; requesting
///   more iterations than fit fails with `NonPositiveIterationBound` before
///   any work is done.
/// - `Same` mode keeps the size, so any iteration count is accepted once the
///   kernel fits the image.
pub fn convolve_iterated(
    input: &ImageF64,
    kernel: &Kernel,
    iterations: usize,
    mode: ConvolutionMode,
) -> Result<Iterated> {
    if iterations == 0 {
        return Ok(Iterated {
            image: input.clone(),
            iterations: 0,
        });
    }

    kernel.check_fits(input.w, input.h)?;
    if mode == ConvolutionMode::Valid {
        if let Some(supported) = supported_iterations(input.w, input.h, kernel) {
            if iterations > supported {
                return Err(ConvolveError::NonPositiveIterationBound {
                    iterations,
                    supported,
                });
            }
        }
    }

    let mut front = ImageF64::new(0, 0);
    let mut back = ImageF64::new(0, 0);
    convolve_into(input, kernel, mode, &mut front)?;
    trace!("convolve_iterated: iteration 1 -> {}x{}", front.w, front.h);
    for k in 1..iterations {
        convolve_into(&front, kernel, mode, &mut back)?;
        std::mem::swap(&mut front, &mut back);
        trace!(
            "convolve_iterated: iteration {} -> {}x{}",
            k + 1,
            front.w,
            front.h
        );
    }

    debug!(
        "convolve_iterated: {iterations} x {:?} with {}x{} kernel, {}x{} -> {}x{}",
        mode,
        kernel.width(),
        kernel.height(),
        input.w,
        input.h,
        front.w,
        front.h
    );

    Ok(Iterated {
        image: front,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolve::grid::{convolve_padded, convolve_valid};

    fn ramp(w: usize, h: usize) -> ImageF64 {
        ImageF64::from_fn(w, h, |x, y| (x * 3 + y * 7) as f64 * 0.5)
    }

    #[test]
    fn zero_iterations_is_identity() {
        let img = ramp(4, 3);
        let huge = Kernel::box_blur(9, 9).unwrap();
        for mode in [ConvolutionMode::Valid, ConvolutionMode::Same] {
            let out = convolve_iterated(&img, &huge, 0, mode).unwrap();
            assert_eq!(out.image, img);
            assert_eq!(out.iterations, 0);
        }
    }

    #[test]
    fn iterations_chain_outputs() {
        let img = ramp(8, 8);
        let k = Kernel::box_blur(3, 3).unwrap();

        let twice = convolve_iterated(&img, &k, 2, ConvolutionMode::Valid).unwrap();
        let by_hand = convolve_valid(&convolve_valid(&img, &k).unwrap(), &k).unwrap();
        assert_eq!(twice.image, by_hand);
        assert_eq!((twice.width(), twice.height()), (4, 4));

        let thrice = convolve_iterated(&img, &k, 3, ConvolutionMode::Same).unwrap();
        let mut expected = img.clone();
        for _ in 0..3 {
            expected = convolve_padded(&expected, &k).unwrap();
        }
        assert_eq!(thrice.image, expected);
        assert_eq!((thrice.width(), thrice.height()), (8, 8));
    }

    #[test]
    fn valid_mode_rejects_too_many_iterations() {
        let img = ramp(7, 9);
        let k = Kernel::box_blur(3, 3).unwrap();
        assert_eq!(supported_iterations(7, 9, &k), Some(3));
        assert!(convolve_iterated(&img, &k, 3, ConvolutionMode::Valid).is_ok());
        assert_eq!(
            convolve_iterated(&img, &k, 4, ConvolutionMode::Valid),
            Err(ConvolveError::NonPositiveIterationBound {
                iterations: 4,
                supported: 3
            })
        );
    }

    #[test]
    fn same_mode_accepts_many_iterations() {
        let img = ramp(5, 5);
        let k = Kernel::box_blur(3, 3).unwrap();
        let out = convolve_iterated(&img, &k, 50, ConvolutionMode::Same).unwrap();
        assert_eq!((out.width(), out.height()), (5, 5));
    }

    #[test]
    fn unit_kernel_never_shrinks() {
        let k = Kernel::new(1, 3, vec![0.25, 0.5, 0.25]).unwrap();
        assert_eq!(supported_iterations(4, 7, &k), Some(3));
        assert_eq!(supported_iterations(4, 7, &Kernel::identity()), None);
        let img = ramp(4, 4);
        let out = convolve_iterated(&img, &Kernel::identity(), 1000, ConvolutionMode::Valid)
            .unwrap();
        assert_eq!(out.image, img);
    }
}
