use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::paths;

/// A single workspace entry in the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed_tui: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed_cli: Option<DateTime<Utc>>,
}

/// The workspace registry (every identity this machine knows about)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceRegistry {
    #[serde(default)]
    pub workspaces: Vec<WorkspaceEntry>,
}

impl WorkspaceRegistry {
    pub fn find(&self, name: &str) -> Option<&WorkspaceEntry> {
        self.workspaces.iter().find(|w| w.name == name)
    }
}

/// Get the registry file path
pub fn registry_path() -> PathBuf {
    paths::config_dir().join("workspaces.toml")
}

/// Read the registry from a specific path.
/// Missing file → empty registry. Corrupted file → backed up as .bak and
/// reset, so a bad edit never blocks the application.
pub fn read_registry_from(path: &Path) -> WorkspaceRegistry {
    if !path.exists() {
        return WorkspaceRegistry::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<WorkspaceRegistry>(&content) {
            Ok(reg) => reg,
            Err(e) => {
                let bak = path.with_extension("toml.bak");
                let _ = fs::copy(path, &bak);
                eprintln!(
                    "warning: could not parse {} (backed up as {}): {}",
                    path.display(),
                    bak.display(),
                    e
                );
                WorkspaceRegistry::default()
            }
        },
        Err(_) => WorkspaceRegistry::default(),
    }
}

pub fn read_registry() -> WorkspaceRegistry {
    read_registry_from(&registry_path())
}

fn write_registry_to(path: &Path, registry: &WorkspaceRegistry) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(content) = toml::to_string_pretty(registry) {
        let _ = fs::write(path, content);
    }
}

pub fn write_registry(registry: &WorkspaceRegistry) {
    write_registry_to(&registry_path(), registry);
}

/// Register a workspace (no-op if already present with the same path)
pub fn register_workspace(name: &str, dir: &Path) {
    let mut registry = read_registry();
    let path_str = dir.to_string_lossy().to_string();
    if let Some(entry) = registry.workspaces.iter_mut().find(|w| w.name == name) {
        entry.path = path_str;
    } else {
        registry.workspaces.push(WorkspaceEntry {
            name: name.to_string(),
            path: path_str,
            last_accessed_tui: None,
            last_accessed_cli: None,
        });
    }
    write_registry(&registry);
}

/// Remove a workspace entry by name. Returns whether one was removed.
/// The workspace directory itself is left alone.
pub fn remove_workspace(name: &str) -> bool {
    let mut registry = read_registry();
    let before = registry.workspaces.len();
    registry.workspaces.retain(|w| w.name != name);
    let removed = registry.workspaces.len() != before;
    if removed {
        write_registry(&registry);
    }
    removed
}

/// Stamp the CLI last-access time for a workspace
pub fn touch_cli(name: &str) {
    touch(name, false);
}

/// Stamp the TUI last-access time for a workspace
pub fn touch_tui(name: &str) {
    touch(name, true);
}

fn touch(name: &str, tui: bool) {
    let mut registry = read_registry();
    if let Some(entry) = registry.workspaces.iter_mut().find(|w| w.name == name) {
        if tui {
            entry.last_accessed_tui = Some(Utc::now());
        } else {
            entry.last_accessed_cli = Some(Utc::now());
        }
        write_registry(&registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_registry_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let reg = read_registry_from(&tmp.path().join("workspaces.toml"));
        assert!(reg.workspaces.is_empty());
    }

    #[test]
    fn registry_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("workspaces.toml");
        let reg = WorkspaceRegistry {
            workspaces: vec![WorkspaceEntry {
                name: "varun".into(),
                path: "/data/varun".into(),
                last_accessed_tui: None,
                last_accessed_cli: Some(Utc::now()),
            }],
        };
        write_registry_to(&path, &reg);
        let loaded = read_registry_from(&path);
        assert_eq!(loaded.workspaces.len(), 1);
        assert_eq!(loaded.workspaces[0].name, "varun");
        assert!(loaded.workspaces[0].last_accessed_cli.is_some());
        assert!(loaded.workspaces[0].last_accessed_tui.is_none());
    }

    #[test]
    fn corrupted_registry_is_backed_up_and_reset() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("workspaces.toml");
        fs::write(&path, "not [valid toml").unwrap();
        let reg = read_registry_from(&path);
        assert!(reg.workspaces.is_empty());
        assert!(tmp.path().join("workspaces.toml.bak").exists());
    }
}
