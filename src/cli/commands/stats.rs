//! Stats command - Mission counts per status

use std::path::Path;

use crate::backend::{JsonFileBackend, MissionBackend};
use crate::errors::{EdlError, Result};
use crate::fs::{find_data_root, resolve_cwd};
use crate::schemas::{MissionStats, MissionStatus};

const STATUSES: [MissionStatus; 5] = [
    MissionStatus::Pending,
    MissionStatus::InProgress,
    MissionStatus::DepartureValidated,
    MissionStatus::Completed,
    MissionStatus::Cancelled,
];

/// Print how many missions sit in each status
pub fn run(cwd: Option<&Path>, json: bool) -> Result<MissionStats> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let stats = JsonFileBackend::new(root).stats()?;

    if json {
        let out = serde_json::to_string_pretty(&stats).map_err(|e| EdlError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(stats);
    }

    println!("Missions: {}", stats.total);
    for status in STATUSES {
        println!("  {:<14} {}", status.label(), stats.count(status));
    }
    Ok(stats)
}
