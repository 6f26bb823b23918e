use grey_conv::convolve::{convolve_iterated, convolve_padded, convolve_valid};
use grey_conv::image::{ImageF64, ImageView};
use grey_conv::{ConvolutionMode, KernelPreset};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> grey_conv::Result<()> {
    // Bright square on a dark background.
    let img = ImageF64::from_fn(8, 8, |x, y| {
        if (2..6).contains(&x) && (2..6).contains(&y) {
            200.0
        } else {
            20.0
        }
    });
    let blur = KernelPreset::BoxBlur.kernel();

    print_grid("input", &img);
    print_grid("valid", &convolve_valid(&img, &blur)?);
    print_grid("same", &convolve_padded(&img, &blur)?);

    let iterated = convolve_iterated(&img, &blur, 2, ConvolutionMode::Valid)?;
    print_grid(
        &format!("valid x{}", iterated.iterations),
        &iterated.image,
    );
    Ok(())
}

fn print_grid(label: &str, img: &ImageF64) {
    println!("{label} ({}x{}):", img.w, img.h);
    for row in img.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:6.1}")).collect();
        println!("  {}", line.join(" "));
    }
}
