use crate::overlay::OverlayOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct OverlayToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub options: OverlayOptions,
    pub output: OverlayOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct OverlayOutputConfig {
    /// Directory receiving one grayscale PNG per field
    pub field_dir: PathBuf,
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<OverlayToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<OverlayToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}
