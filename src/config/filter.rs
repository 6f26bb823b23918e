//! JSON configuration for the `filter_image` tool.
use crate::convolve::ConvolutionMode;
use crate::error::ConvolveError;
use crate::kernel::{Kernel, KernelPreset};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct FilterToolConfig {
    pub input: PathBuf,
    pub filters: Vec<FilterConfig>,
    pub output: FilterOutputConfig,
}

/// Kernel given either by preset name or by explicit weights.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum KernelConfig {
    Preset(KernelPreset),
    Custom {
        width: usize,
        height: usize,
        weights: Vec<f64>,
    },
}

impl KernelConfig {
    pub fn to_kernel(&self) -> Result<Kernel, ConvolveError> {
        match self {
            KernelConfig::Preset(preset) => Ok(preset.kernel()),
            KernelConfig::Custom {
                width,
                height,
                weights,
            } => Kernel::new(*width, *height, weights.clone()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FilterConfig {
    /// Used for the output file name.
    pub name: String,
    pub kernel: KernelConfig,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub mode: ConvolutionMode,
}

fn default_scale() -> f64 {
    1.0
}

fn default_iterations() -> usize {
    1
}

#[derive(Debug, Deserialize)]
pub struct FilterOutputConfig {
    pub dir: PathBuf,
    pub summary_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<FilterToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<FilterToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}
