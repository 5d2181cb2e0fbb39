//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the invex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Input/output locations.
    pub paths: PathsConfig,

    /// Output projection toggles.
    pub output: OutputConfig,
}

/// Filesystem layout of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root folder containing one subfolder per batch of PDFs.
    pub invoices_dir: PathBuf,

    /// Field-region definition file. A missing file is not fatal; the
    /// pipeline falls back to whole-page extraction.
    pub coordinates_file: PathBuf,

    /// Root for generated outputs; `json/` and `csv/` are created inside.
    pub outputs_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            invoices_dir: PathBuf::from("invoices"),
            coordinates_file: PathBuf::from("coordinates.txt"),
            outputs_dir: PathBuf::from("outputs"),
        }
    }
}

/// Which projections to write per folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write the JSON projection.
    pub json: bool,

    /// Write the fixed-schema CSV projection.
    pub csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: true,
            csv: true,
        }
    }
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
