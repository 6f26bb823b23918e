use crate::image::ImageView;
use crate::kernel::Kernel;
use crate::pixel::round_half_up;

/// Weighted sum of the `kernel`-sized neighbourhood anchored at `(x, y)`.
///
/// Callers guarantee `x + kernel.width() <= input.width()` and
/// `y + kernel.height() <= input.height()`. Accumulation runs column-major
/// (`i` outer, `j` inner) so results are reproducible bit for bit.
#[inline]
pub fn point_convolve<I>(input: &I, x: usize, y: usize, kernel: &Kernel) -> f64
where
    I: ImageView<Pixel = f64>,
{
    let mut acc = 0.0;
    for i in 0..kernel.width() {
        for j in 0..kernel.height() {
            acc += input.at(x + i, y + j) * kernel.at(i, j);
        }
    }
    acc
}

/// Integer variant of [`point_convolve`] for pixel-valued grids.
///
/// Each product is rounded to the nearest integer (half up) before it is
/// added, so rounding error accumulates across terms. This is intentionally
/// not the same as rounding the float sum once.
#[inline]
pub fn point_convolve_rounded<I>(input: &I, x: usize, y: usize, kernel: &Kernel) -> i32
where
    I: ImageView<Pixel = i32>,
{
    let mut acc: i32 = 0;
    for i in 0..kernel.width() {
        for j in 0..kernel.height() {
            let term = round_half_up(input.at(x + i, y + j) as f64 * kernel.at(i, j));
            acc = acc.wrapping_add(term as i32);
        }
    }
    acc
}
