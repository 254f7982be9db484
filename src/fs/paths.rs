//! Path resolution utilities for the edl data directory
//!
//! Provides functions to locate the data root and construct paths to
//! configuration and per-mission files.

use std::path::{Path, PathBuf};

use crate::errors::{EdlError, Result};

/// Find the nearest directory containing a `.edl` data directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `DataDirNotFound` - If no ancestor contains `.edl`
pub fn find_data_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| EdlError::DataDirNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if get_edl_dir(&current).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(EdlError::DataDirNotFound(
                    "Could not find a .edl directory; run `edl init` first".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .edl directory.
pub fn get_edl_dir(root: &Path) -> PathBuf {
    root.join(".edl")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_edl_dir(root).join("config.json")
}

/// Get the path to the missions directory.
pub fn get_missions_dir(root: &Path) -> PathBuf {
    get_edl_dir(root).join("missions")
}

/// Get the path to a specific mission's directory.
pub fn get_mission_dir(root: &Path, code: &str) -> PathBuf {
    get_missions_dir(root).join(code)
}

/// Get the path to a mission's mission.json file.
pub fn get_mission_json_path(root: &Path, code: &str) -> PathBuf {
    get_mission_dir(root, code).join("mission.json")
}

/// Get the path to a mission's photos.json upload manifest.
pub fn get_photos_path(root: &Path, code: &str) -> PathBuf {
    get_mission_dir(root, code).join("photos.json")
}

/// Get the path to a mission's inspection.json payload.
pub fn get_inspection_path(root: &Path, code: &str) -> PathBuf {
    get_mission_dir(root, code).join("inspection.json")
}
