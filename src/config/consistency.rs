use crate::edges::CannyParams;
use crate::lanes::DetectorConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ConsistencyToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub edges: CannyParams,
    #[serde(default = "DetectorConfig::pass1")]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub filter: ConsistencyFilterConfig,
    pub output: ConsistencyOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConsistencyFilterConfig {
    /// Minimum fraction of matching pixels.
    pub percentage: f64,
    /// Angular tolerance in degrees.
    pub delta_deg: f64,
}

impl Default for ConsistencyFilterConfig {
    fn default() -> Self {
        Self {
            percentage: 0.6,
            delta_deg: 10.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConsistencyOutputConfig {
    pub segments_json: PathBuf,
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ConsistencyToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_and_detector_fall_back_to_defaults() {
        let cfg: ConsistencyToolConfig = serde_json::from_str(
            r#"{ "input": "frame.png", "output": { "segments_json": "out.json" } }"#,
        )
        .expect("parse");
        assert_eq!(cfg.detector, DetectorConfig::pass1());
        assert_eq!(cfg.filter.percentage, 0.6);
        assert_eq!(cfg.filter.delta_deg, 10.0);
        assert!(cfg.output.overlay_image.is_none());
    }
}
