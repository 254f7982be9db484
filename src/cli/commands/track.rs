//! Track command - Client-facing status

use std::path::Path;

use serde::Serialize;

use crate::backend::{JsonFileBackend, MissionBackend};
use crate::errors::{EdlError, Result};
use crate::fs::{find_data_root, resolve_cwd};
use crate::schemas::{normalize_mission_code, Mission, MissionStatus};

/// What the client tracking page shows for a mission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingView {
    pub mission_code: String,
    pub status: MissionStatus,
    pub label: &'static str,
    pub step: u8,
    pub updated_at: String,
    /// The report is downloadable once the mission is completed
    pub report_available: bool,
}

impl From<&Mission> for TrackingView {
    fn from(mission: &Mission) -> Self {
        TrackingView {
            mission_code: mission.code.clone(),
            status: mission.status,
            label: mission.status.label(),
            step: mission.status.tracking_step(),
            updated_at: mission.updated_at.clone(),
            report_available: mission.status == MissionStatus::Completed,
        }
    }
}

/// Print the status label and tracking step of a mission
pub fn run(cwd: Option<&Path>, code: &str, json: bool) -> Result<TrackingView> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let code = normalize_mission_code(code)?;
    let mission = JsonFileBackend::new(root).lookup(&code)?;
    let view = TrackingView::from(&mission);

    if json {
        let out = serde_json::to_string_pretty(&view).map_err(|e| EdlError::InvalidJson(e.to_string()))?;
        println!("{}", out);
    } else {
        println!("{}: {} (étape {}/4)", view.mission_code, view.label, view.step);
    }
    Ok(view)
}
