//! JSON projection of a folder's documents.

use std::fs;
use std::path::Path;

use crate::error::OutputError;

use super::FolderResult;

/// Write the folder's `filename -> {"metadata": {...}}` mapping, pretty
/// printed, entries in filename order.
pub fn write_folder_json(path: &Path, documents: &FolderResult) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(documents)?;
    fs::write(path, json)?;
    Ok(())
}
