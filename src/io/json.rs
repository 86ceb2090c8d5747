//! JSON artifact for the dataset
//!
//! The artifact is a single flat object, `{"<timestamp>": <code>, ...}`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::error::{ActivityLogError, Result};

/// Render a dataset as a JSON object
pub fn to_json_string(dataset: &Dataset) -> Result<String> {
    Ok(serde_json::to_string(dataset)?)
}

/// Parse a JSON artifact back into a dataset
///
/// # Errors
/// Returns a `Json` error if the text is not an object of integer-keyed
/// non-negative integers, and `InvalidArtifact` if any code is zero.
pub fn from_json_str(json: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(json)?;

    if let Some((timestamp, _)) = dataset.iter().find(|(_, code)| *code == 0) {
        return Err(ActivityLogError::InvalidArtifact(format!(
            "entry {timestamp} has code 0, codes must be positive"
        )));
    }

    Ok(dataset)
}

/// Write the artifact to `path`
///
/// The text goes to a sibling temporary file first and is renamed into place,
/// so `path` never holds a partial artifact.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let json = to_json_string(dataset)?;
    let staging = staging_path(path);

    fs::write(&staging, json).map_err(|e| ActivityLogError::io(&staging, e))?;
    if let Err(e) = fs::rename(&staging, path) {
        // Best effort; the rename error is the one worth reporting
        let _ = fs::remove_file(&staging);
        return Err(ActivityLogError::io(path, e));
    }

    Ok(())
}

/// Read an artifact from `path`
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let json = fs::read_to_string(path).map_err(|e| ActivityLogError::io(path, e))?;
    from_json_str(&json)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "dataset".to_string(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}
