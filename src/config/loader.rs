//! Configuration loading with defaults

use std::path::Path;

use crate::errors::Result;
use crate::fs;
use crate::schemas::InspectionConfig;

/// Load the inspection policy, falling back to defaults.
///
/// A missing config.json yields the default policy; a partial file is
/// completed with per-field defaults. The result is validated.
///
/// # Errors
/// * `InvalidJson` - If config.json is malformed
/// * `ConfigError` - If a slot list is empty or has blank/duplicate ids
pub fn load_config(root: &Path) -> Result<InspectionConfig> {
    let config = fs::read_config(root)?;
    config.validate()?;
    tracing::debug!(
        departure = config.departure_slots.len(),
        arrival = config.arrival_slots.len(),
        "loaded inspection config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EdlError;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let temp = TempDir::new().unwrap();
        std_fs::create_dir(temp.path().join(".edl")).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.departure_slots.len(), 10);
        assert_eq!(config.arrival_slots.len(), 3);
        assert!(config.require_key_count);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let edl_dir = temp.path().join(".edl");
        std_fs::create_dir(&edl_dir).unwrap();

        let config_content = r#"{
            "departure_slots": ["compteur", "face-avant"],
            "require_key_count": false
        }"#;
        std_fs::write(edl_dir.join("config.json"), config_content).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.departure_slots, vec!["compteur", "face-avant"]);
        assert!(!config.require_key_count);
        // Default for unspecified field
        assert_eq!(config.arrival_slots.len(), 3);
    }

    #[test]
    fn test_load_config_rejects_duplicates() {
        let temp = TempDir::new().unwrap();
        let edl_dir = temp.path().join(".edl");
        std_fs::create_dir(&edl_dir).unwrap();
        std_fs::write(edl_dir.join("config.json"), r#"{"arrival_slots": ["compteur", "compteur"]}"#)
            .unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, EdlError::ConfigError(_)));
    }
}
