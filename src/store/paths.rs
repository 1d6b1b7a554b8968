use std::fs;
use std::path::PathBuf;

use crate::model::config::AppConfig;
use crate::store::config_io;
use crate::store::registry;

/// Which surface is resolving the workspace (stamps the matching
/// last-access time in the registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Cli,
    Tui,
}

/// Config directory, respecting XDG_CONFIG_HOME
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("lifeos")
}

/// Default root for workspace data, respecting XDG_DATA_HOME
pub fn data_root() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
        .join("lifeos")
}

/// Data root, honoring a config override
pub fn data_root_from(config: &AppConfig) -> PathBuf {
    config
        .workspace
        .data_root
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(data_root)
}

/// Resolve the workspace directory: an explicit -C path wins, otherwise the
/// active workspace from config + registry.
pub fn resolve_workspace_dir(
    data_dir: Option<&str>,
    caller: Caller,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(dir) = data_dir {
        let path = PathBuf::from(dir);
        fs::create_dir_all(&path)?;
        return Ok(path);
    }

    let (config, _) = config_io::read_config()?;
    let name = config.workspace.active.clone().ok_or(
        "no active workspace (run `lo init <name>` or `lo workspace use <name>`)",
    )?;
    let registry_file = registry::read_registry();
    let dir = match registry_file.find(&name) {
        Some(entry) => PathBuf::from(&entry.path),
        None => data_root_from(&config).join(&name),
    };
    match caller {
        Caller::Cli => registry::touch_cli(&name),
        Caller::Tui => registry::touch_tui(&name),
    }
    Ok(dir)
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}
