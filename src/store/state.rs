use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json in the workspace dir)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which view is showing ("dashboard", "day", "routine", "calendar",
    /// "badges", "profile")
    pub view: String,
    /// Selected date in the day/routine views
    #[serde(default)]
    pub selected_date: Option<NaiveDate>,
    /// Cursor row in the day view
    #[serde(default)]
    pub day_cursor: usize,
    /// Cursor row in the routine view
    #[serde(default)]
    pub routine_cursor: usize,
    /// Calendar month being browsed, "YYYY-MM"
    #[serde(default)]
    pub calendar_month: Option<String>,
}

/// Read .state.json from the workspace directory
pub fn read_ui_state(workspace_dir: &Path) -> Option<UiState> {
    let path = workspace_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the workspace directory
pub fn write_ui_state(workspace_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = workspace_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            view: "day".into(),
            selected_date: NaiveDate::from_ymd_opt(2026, 8, 7),
            day_cursor: 3,
            routine_cursor: 1,
            calendar_month: Some("2026-08".into()),
        };

        write_ui_state(dir.path(), &state).unwrap();
        let loaded = read_ui_state(dir.path()).unwrap();

        assert_eq!(loaded.view, "day");
        assert_eq!(loaded.selected_date, NaiveDate::from_ymd_opt(2026, 8, 7));
        assert_eq!(loaded.day_cursor, 3);
        assert_eq!(loaded.calendar_month.as_deref(), Some("2026-08"));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let state: UiState = serde_json::from_str(r#"{"view":"dashboard"}"#).unwrap();
        assert_eq!(state.view, "dashboard");
        assert!(state.selected_date.is_none());
        assert_eq!(state.day_cursor, 0);
        assert!(state.calendar_month.is_none());
    }
}
