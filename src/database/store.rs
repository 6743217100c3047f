use std::fs;
use std::path::Path;

use super::Registry;
use crate::error::AppError;

/// Read a registry previously written by [`save_registry`].
pub fn load_registry(path: impl AsRef<Path>) -> Result<Registry, AppError> {
    let contents = fs::read_to_string(path)?;
    let registry = serde_json::from_str(&contents)?;
    Ok(registry)
}

/// Write the registry as pretty JSON, creating parent directories as needed.
pub fn save_registry(path: impl AsRef<Path>, registry: &Registry) -> Result<(), AppError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(registry)?;
    fs::write(path, contents)?;
    log::debug!("Saved {} workers to {}", registry.workers.len(), path.display());
    Ok(())
}
