use grey_conv::pixel::pack_grey;
use grey_conv::ImageF64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates a high-contrast checkerboard of packed grey pixels.
pub fn checkerboard_pixels(width: usize, height: usize, cell: usize) -> Vec<u32> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u32; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = pack_grey(val);
        }
    }
    img
}

/// Uniform packed grey image.
pub fn uniform_pixels(width: usize, height: usize, grey: u8) -> Vec<u32> {
    vec![pack_grey(grey); width * height]
}

/// Seeded random grey grid with integer samples in [0, 255].
pub fn noise_grid(width: usize, height: usize, seed: u64) -> ImageF64 {
    let mut rng = StdRng::seed_from_u64(seed);
    ImageF64::from_fn(width, height, |_, _| rng.gen_range(0..=255u8) as f64)
}
