use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::InitArgs;
use crate::store::config_io;
use crate::store::document;
use crate::store::paths;
use crate::store::registry;
use crate::store::store::Store;

/// Validate that a workspace name is lowercase alphanumeric with hyphens.
fn validate_workspace_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("workspace name cannot be empty".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(format!(
            "invalid workspace name \"{}\": use lowercase with hyphens (e.g. \"my-space\")",
            name
        ));
    }
    Ok(())
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_workspace_name(&args.name)?;

    let (config, mut doc) = config_io::read_config()?;
    let dir = match &args.path {
        Some(p) => PathBuf::from(p),
        None => config
            .workspace
            .data_root
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(paths::data_root)
            .join(&args.name),
    };

    if document::document_path(&dir).exists() {
        return Err(format!(
            "workspace \"{}\" already exists at {}",
            args.name,
            dir.display()
        )
        .into());
    }

    // Seed the document, register the workspace, make it active
    let today = Local::now().date_naive();
    let (store, _) = Store::open(&dir, today)?;
    registry::register_workspace(&args.name, &dir);
    config_io::set_active_workspace(&mut doc, &args.name);
    config_io::write_config(&doc)?;

    println!("Initialized workspace: {}", args.name);
    println!("  document: {}", document::document_path(&dir).display());
    println!(
        "  routine: {} default habits",
        store.aggregate().custom_routine.len()
    );
    println!("  now active");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_names_are_lowercase_hyphenated() {
        assert!(validate_workspace_name("varun").is_ok());
        assert!(validate_workspace_name("my-space-2").is_ok());
        assert!(validate_workspace_name("").is_err());
        assert!(validate_workspace_name("My Space").is_err());
        assert!(validate_workspace_name("UPPER").is_err());
        assert!(validate_workspace_name("under_score").is_err());
    }
}
