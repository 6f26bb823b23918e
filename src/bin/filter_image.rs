use grey_conv::config::filter::{load_config, FilterConfig};
use grey_conv::image::io::{load_grayscale_image, save_pixel_buffer, write_json_file};
use grey_conv::{ConvolutionMode, PixelBuffer};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let pixels = PixelBuffer::from_view(&gray.as_view());
    info!(
        "loaded {} ({}x{}), {} filters",
        config.input.display(),
        pixels.w,
        pixels.h,
        config.filters.len()
    );

    // Each filter call is independent, so they run on the rayon pool.
    let results: Vec<(FilterSummary, PixelBuffer)> = config
        .filters
        .par_iter()
        .map(|filter| apply_filter(&pixels, filter))
        .collect::<Result<_, String>>()?;

    let mut summaries = Vec::with_capacity(results.len());
    for (mut summary, buffer) in results {
        let path = config.output.dir.join(format!("{}.png", summary.name));
        save_pixel_buffer(&buffer, &path)?;
        println!(
            "{:<16} {}x{} -> {} ({:.3} ms)",
            summary.name,
            summary.width,
            summary.height,
            path.display(),
            summary.elapsed_ms
        );
        summary.output = path.display().to_string();
        summaries.push(summary);
    }

    if let Some(path) = &config.output.summary_json {
        let report = FilterReport {
            input: config.input.display().to_string(),
            width: pixels.w,
            height: pixels.h,
            filters: summaries,
        };
        write_json_file(path, &report)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn apply_filter(
    pixels: &PixelBuffer,
    filter: &FilterConfig,
) -> Result<(FilterSummary, PixelBuffer), String> {
    let kernel = filter
        .kernel
        .to_kernel()
        .map_err(|e| format!("Filter '{}': {e}", filter.name))?;
    let start = Instant::now();
    let buffer = pixels
        .filter_iterated(
            &kernel,
            filter.iterations,
            filter.mode,
            filter.scale,
            filter.offset,
        )
        .map_err(|e| format!("Filter '{}': {e}", filter.name))?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let summary = FilterSummary {
        name: filter.name.clone(),
        kernel_width: kernel.width(),
        kernel_height: kernel.height(),
        iterations: filter.iterations,
        mode: filter.mode,
        scale: filter.scale,
        offset: filter.offset,
        width: buffer.w,
        height: buffer.h,
        elapsed_ms,
        output: String::new(),
    };
    Ok((summary, buffer))
}

fn usage() -> String {
    "Usage: filter_image <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterReport {
    input: String,
    width: usize,
    height: usize,
    filters: Vec<FilterSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterSummary {
    name: String,
    kernel_width: usize,
    kernel_height: usize,
    iterations: usize,
    mode: ConvolutionMode,
    scale: f64,
    offset: f64,
    width: usize,
    height: usize,
    elapsed_ms: f64,
    output: String,
}
