use loan_fee_core::fee::FeeTable;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// The fee table at `path`, or the standard table when no path is given.
pub fn load_fee_table(path: Option<&str>) -> Result<FeeTable, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let table: FeeTable = read_json(path)?;
            if table.is_empty() {
                return Err(format!("Fee table '{path}' contains no schedules").into());
            }
            debug!(path, "loaded fee table");
            Ok(table)
        }
        None => Ok(FeeTable::standard()),
    }
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.is_file() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    Ok(canonical)
}
