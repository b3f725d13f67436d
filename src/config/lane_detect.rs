use crate::lanes::LaneParams;
use crate::video::DEFAULT_FPS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LaneToolConfig {
    /// Directory of frames, GIF, still image, or a capture device index.
    pub input: String,
    /// Dump the intermediate stage images of every frame.
    #[serde(default)]
    pub show_steps: bool,
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Stop after this many frames.
    #[serde(default)]
    pub max_frames: Option<usize>,
    #[serde(default)]
    pub output: LaneOutputConfig,
    #[serde(default)]
    pub lanes: LaneParams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LaneOutputConfig {
    /// `.gif` for an animation, anything else for a PNG directory.
    pub video: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
    /// Where stage images go when `show_steps` is set.
    pub steps_dir: Option<PathBuf>,
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

pub fn load_config(path: &Path) -> Result<LaneToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<LaneToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
