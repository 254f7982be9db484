//! Show command - Mission details and starting phase

use std::path::Path;

use serde::Serialize;

use crate::backend::{JsonFileBackend, MissionBackend};
use crate::domain::{initial_phase_for_status, Phase};
use crate::errors::{EdlError, Result};
use crate::fs::{find_data_root, resolve_cwd};
use crate::schemas::{normalize_mission_code, Mission};

#[derive(Debug, Serialize)]
struct MissionView<'a> {
    mission: &'a Mission,
    phase: Phase,
    departure_validated: bool,
}

/// Show a mission and the phase an inspection session would open in
pub fn run(cwd: Option<&Path>, code: &str, json: bool) -> Result<()> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let code = normalize_mission_code(code)?;
    let mission = JsonFileBackend::new(root).lookup(&code)?;
    let (phase, departure_validated) = initial_phase_for_status(mission.status)
        .ok_or_else(|| EdlError::MissionCancelled(mission.code.clone()))?;

    if json {
        let view = MissionView {
            mission: &mission,
            phase,
            departure_validated,
        };
        let out = serde_json::to_string_pretty(&view).map_err(|e| EdlError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Mission {} ({})", mission.code, mission.status.label());
    println!("  Véhicule: {}", mission.vehicle_summary());
    if let Some(plate) = &mission.license_plate {
        println!("  Immatriculation: {}", plate);
    }
    if let (Some(from), Some(to)) = (&mission.pickup_location, &mission.delivery_location) {
        println!("  Trajet: {} → {}", from, to);
    }
    if let Some(client) = &mission.client_name {
        println!("  Client: {}", client);
    }
    println!("  Phase: {}{}", phase, if departure_validated { " (départ verrouillé)" } else { "" });
    Ok(())
}
