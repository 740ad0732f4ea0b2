//! JSON runtime configuration for tools driving the finder.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::finder::StaffParams;
use crate::types::SegmentCandidate;

#[derive(Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}

#[derive(Clone, Deserialize)]
pub struct RuntimeConfig {
    /// JSON file holding the extracted `SegmentCandidate` list.
    pub segments_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    pub staff_params: StaffParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

pub fn load_candidates(path: &Path) -> Result<Vec<SegmentCandidate>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read segments {}: {e}", path.display()))?;
    let candidates: Vec<SegmentCandidate> = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse segments {}: {e}", path.display()))?;
    Ok(candidates)
}
