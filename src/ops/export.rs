use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::model::aggregate::Aggregate;

/// Error type for backup export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not write backup to {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize backup: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The backup document: the full aggregate plus an export timestamp.
/// Export-only; there is no import path.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Backup<'a> {
    exported_at: String,
    #[serde(flatten)]
    data: &'a Aggregate,
}

/// Serialize the aggregate as a backup document
pub fn backup_json(agg: &Aggregate, exported_at: DateTime<Local>) -> Result<String, ExportError> {
    let backup = Backup {
        exported_at: exported_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        data: agg,
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Default backup filename for a given date
pub fn default_backup_name(date: NaiveDate) -> String {
    format!("lifeos-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Write the backup file, returning its path
pub fn export_backup(
    agg: &Aggregate,
    out: &Path,
    exported_at: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let json = backup_json(agg, exported_at)?;
    fs::write(out, json).map_err(|e| ExportError::WriteError {
        path: out.to_path_buf(),
        source: e,
    })?;
    Ok(out.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn backup_carries_timestamp_and_aggregate_fields() {
        let agg = Aggregate::default();
        let at = Local.with_ymd_and_hms(2026, 8, 7, 12, 30, 0).unwrap();
        let json = backup_json(&agg, at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["exportedAt"].as_str().unwrap().starts_with("2026-08-07T12:30:00"));
        assert!(value["tasks"].is_array());
        assert!(value["routineHistory"].is_object());
        assert_eq!(value["customRoutine"].as_array().unwrap().len(), 6);
        assert_eq!(value["level"], 1);
    }

    #[test]
    fn default_name_embeds_date() {
        let d = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(default_backup_name(d), "lifeos-backup-2026-08-07.json");
    }

    #[test]
    fn export_writes_readable_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("backup.json");
        let at = Local.with_ymd_and_hms(2026, 8, 7, 12, 30, 0).unwrap();
        let path = export_backup(&Aggregate::default(), &out, at).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("exportedAt"));
    }
}
