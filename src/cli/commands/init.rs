//! Init command - Create the .edl data directory

use std::path::Path;

use crate::errors::{EdlError, Result};
use crate::fs::{get_config_path, get_missions_dir, resolve_cwd, write_json};
use crate::schemas::InspectionConfig;

/// Create `.edl/config.json` and `.edl/missions/` under the working directory
pub fn run(cwd: Option<&Path>, force: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let config_path = get_config_path(&root);

    if config_path.exists() && !force {
        return Err(EdlError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    write_json(&config_path, &InspectionConfig::default())?;
    std::fs::create_dir_all(get_missions_dir(&root))?;
    tracing::info!(path = %config_path.display(), "initialized data directory");
    println!("Initialized {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_default_config() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false).unwrap();

        assert!(get_missions_dir(temp.path()).is_dir());
        assert_eq!(load_config(temp.path()).unwrap(), InspectionConfig::default());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false).unwrap();

        assert!(matches!(run(Some(temp.path()), false), Err(EdlError::ConfigError(_))));
        assert!(run(Some(temp.path()), true).is_ok());
    }
}
