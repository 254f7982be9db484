//! File system utilities for the edl data directory
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{
    list_missions, read_config, read_json, read_mission, write_inspection, write_json,
    write_mission,
};
pub use paths::{
    find_data_root, get_config_path, get_edl_dir, get_inspection_path, get_mission_dir,
    get_mission_json_path, get_missions_dir, get_photos_path, resolve_cwd,
};
