use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::model::aggregate::Aggregate;
use crate::store::journal;

/// Filename of the aggregate document inside a workspace directory
pub const DOC_FILE: &str = "document.json";

/// Error type for document I/O
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse document: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub fn document_path(workspace_dir: &Path) -> PathBuf {
    workspace_dir.join(DOC_FILE)
}

/// Load the aggregate document, or None if it does not exist yet.
pub fn load(workspace_dir: &Path) -> Result<Option<Aggregate>, DocumentError> {
    let path = document_path(workspace_dir);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|e| DocumentError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Load the document, seeding a fresh one if genuinely absent.
/// Returns the aggregate and whether a seed write happened.
pub fn load_or_seed(
    workspace_dir: &Path,
    today: NaiveDate,
) -> Result<(Aggregate, bool), DocumentError> {
    if let Some(agg) = load(workspace_dir)? {
        return Ok((agg, false));
    }
    let agg = Aggregate::seeded(today);
    save(workspace_dir, &agg)?;
    Ok((agg, true))
}

/// Replace the whole document on disk (atomic temp-file write).
pub fn save(workspace_dir: &Path, agg: &Aggregate) -> Result<(), DocumentError> {
    let path = document_path(workspace_dir);
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| DocumentError::WriteError {
            path: path.clone(),
            source: e,
        })?;
    }
    let content = serde_json::to_string_pretty(agg)?;
    journal::atomic_write(&path, content.as_bytes()).map_err(|e| DocumentError::WriteError {
        path,
        source: e,
    })
}
