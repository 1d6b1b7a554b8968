use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;
use crate::store::paths;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not parse config.toml: {0}")]
    EditParseError(#[from] toml_edit::TomlError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

pub fn config_path() -> PathBuf {
    paths::config_dir().join("config.toml")
}

/// Read the app config from a specific path, returning both the parsed
/// config and the raw toml_edit document for round-trip-safe editing.
/// A missing file yields defaults and an empty document.
pub fn read_config_from(path: &Path) -> Result<(AppConfig, toml_edit::DocumentMut), ConfigError> {
    if !path.exists() {
        return Ok((AppConfig::default(), toml_edit::DocumentMut::new()));
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: AppConfig = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

pub fn read_config() -> Result<(AppConfig, toml_edit::DocumentMut), ConfigError> {
    read_config_from(&config_path())
}

/// Write the config document back, preserving formatting.
pub fn write_config_to(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, doc.to_string()).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

pub fn write_config(doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    write_config_to(&config_path(), doc)
}

/// Set the active workspace (the signed-in identity)
pub fn set_active_workspace(doc: &mut toml_edit::DocumentMut, name: &str) {
    if !doc.contains_key("workspace") {
        doc["workspace"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["workspace"]["active"] = toml_edit::value(name);
}

/// Clear the active workspace (sign out)
pub fn clear_active_workspace(doc: &mut toml_edit::DocumentMut) {
    if let Some(table) = doc.get_mut("workspace").and_then(|i| i.as_table_mut()) {
        table.remove("active");
    }
}
