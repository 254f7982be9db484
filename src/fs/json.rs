//! JSON file operations
//!
//! Reads go through serde; writes are atomic (temp file, then rename).

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{EdlError, Result};
use crate::schemas::{InspectionConfig, InspectionPayload, Mission};

use super::paths::{get_config_path, get_inspection_path, get_mission_json_path, get_missions_dir};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the content does not parse into `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EdlError::FileNotFound(path.display().to_string())
        } else {
            EdlError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        EdlError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| EdlError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read config.json, or the default policy if the file doesn't exist.
pub fn read_config(root: &Path) -> Result<InspectionConfig> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(InspectionConfig::default());
    }
    read_json(&path)
}

/// Read a mission by code.
///
/// # Errors
/// * `NotFound` - If no mission.json exists for the code
pub fn read_mission(root: &Path, code: &str) -> Result<Mission> {
    read_json(&get_mission_json_path(root, code)).map_err(|e| match e {
        EdlError::FileNotFound(_) => EdlError::NotFound(code.to_string()),
        other => other,
    })
}

/// Read every mission under `.edl/missions`, ordered by code.
///
/// Directories without a mission.json are skipped; a missing missions
/// directory yields an empty list.
pub fn list_missions(root: &Path) -> Result<Vec<Mission>> {
    let dir = get_missions_dir(root);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut missions = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path().join("mission.json");
        if path.is_file() {
            missions.push(read_json::<Mission>(&path)?);
        }
    }
    missions.sort_by(|a, b| a.code.cmp(&b.code));
    Ok(missions)
}

pub fn write_mission(root: &Path, mission: &Mission) -> Result<()> {
    write_json(&get_mission_json_path(root, &mission.code), mission)
}

pub fn write_inspection(root: &Path, code: &str, payload: &InspectionPayload) -> Result<()> {
    write_json(&get_inspection_path(root, code), payload)
}
