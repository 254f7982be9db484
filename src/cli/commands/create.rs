//! Create command - Register a new mission

use std::path::{Path, PathBuf};

use crate::backend::{JsonFileBackend, MissionBackend};
use crate::errors::{EdlError, Result};
use crate::fs::{find_data_root, read_json, resolve_cwd};
use crate::schemas::{Mission, NewMission};

/// Command-line overrides applied on top of an optional form file
#[derive(Debug, Default)]
pub struct CreateArgs {
    pub from: Option<PathBuf>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub plate: Option<String>,
    pub client: Option<String>,
    pub provider: Option<String>,
    pub urgency: Option<String>,
}

impl CreateArgs {
    fn into_draft(self) -> Result<NewMission> {
        let mut draft: NewMission = match &self.from {
            Some(path) => read_json(path)?,
            None => NewMission::default(),
        };
        draft.vehicle_brand = self.brand.or(draft.vehicle_brand);
        draft.vehicle_model = self.model.or(draft.vehicle_model);
        draft.license_plate = self.plate.or(draft.license_plate);
        draft.client_name = self.client.or(draft.client_name);
        draft.provider_name = self.provider.or(draft.provider_name);
        draft.urgency = self.urgency.or(draft.urgency);
        Ok(draft)
    }
}

/// Create a pending mission in the data directory and print its code
pub fn run(cwd: Option<&Path>, args: CreateArgs, json: bool) -> Result<Mission> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let draft = args.into_draft()?;
    let mission = JsonFileBackend::new(root).create(draft)?;

    if json {
        let out = serde_json::to_string_pretty(&mission).map_err(|e| EdlError::InvalidJson(e.to_string()))?;
        println!("{}", out);
    } else {
        println!("Mission {} créée ({})", mission.code, mission.status.label());
        println!("  edl show {}", mission.code);
        println!("  edl track {}", mission.code);
    }
    Ok(mission)
}
