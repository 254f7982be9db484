//! Replay command - Apply a scripted sequence of inspection events

use std::path::Path;

use crate::backend::JsonFileBackend;
use crate::config::load_config;
use crate::domain::InspectionEvent;
use crate::errors::{EdlError, Result};
use crate::fs::{find_data_root, read_json, resolve_cwd};
use crate::workflow::{InspectionWorkflow, OutcomeReport};

/// Open `code`, apply every event in `events_path` in order, then save the inspection.
///
/// Rejected events are reported and the replay carries on, as a UI would.
pub fn run(cwd: Option<&Path>, code: &str, events_path: &Path, json: bool) -> Result<()> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let config = load_config(&root)?;
    let events: Vec<InspectionEvent> = read_json(events_path)?;

    let mut workflow = InspectionWorkflow::new(JsonFileBackend::new(root), config);
    workflow.open(code)?;

    let mut reports = Vec::with_capacity(events.len());
    for (index, event) in events.into_iter().enumerate() {
        let outcome = workflow.apply(event)?;
        let report = OutcomeReport::from(&outcome);
        if !json {
            print_report(index + 1, &report);
        }
        reports.push(report);
    }

    if let Err(e) = workflow.save_inspection() {
        tracing::warn!(error = %e, "inspection payload not saved");
    }

    let session = workflow.session().ok_or(EdlError::NoActiveSession)?;
    let progress = session.progress();

    if json {
        let value = serde_json::json!({
            "outcomes": reports,
            "phase": session.phase(),
            "departure_validated": session.is_departure_validated(),
            "progress": progress,
        });
        let out = serde_json::to_string_pretty(&value).map_err(|e| EdlError::InvalidJson(e.to_string()))?;
        println!("{}", out);
    } else {
        println!(
            "Phase: {} | étape {}/4 | photos {}/{} ({}%)",
            session.phase(),
            progress.step,
            progress.captured,
            progress.required,
            progress.percent
        );
    }
    Ok(())
}

fn print_report(index: usize, report: &OutcomeReport) {
    match (&report.effect, &report.message) {
        (Some(effect), _) => println!("#{} ok: {:?}", index, effect),
        (None, Some(message)) => println!(
            "#{} refused [{}]: {}",
            index,
            report.error_code.unwrap_or("UNKNOWN"),
            message
        ),
        (None, None) => println!("#{} refused", index),
    }
    for warning in &report.warnings {
        println!("   warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MissionBackend;
    use crate::fs::{write_json, write_mission};
    use crate::schemas::{Mission, MissionStatus};
    use tempfile::TempDir;

    #[test]
    fn test_replay_validates_departure_on_disk() {
        let temp = TempDir::new().unwrap();
        crate::cli::commands::init::run(Some(temp.path()), false).unwrap();
        write_mission(temp.path(), &Mission::new("5".to_string(), "MIS-0005".to_string())).unwrap();

        let mut events = serde_json::json!([
            {"type": "set_checklist_item", "item": "vehiclePapers", "answer": "yes"},
            {"type": "set_checklist_item", "item": "gps", "answer": "no"},
            {"type": "set_checklist_item", "item": "sdCard", "answer": "not_applicable"},
            {"type": "set_checklist_item", "item": "safetyKit", "answer": "yes"},
            {"type": "set_checklist_item", "item": "spareWheel", "answer": "yes"},
            {"type": "adjust_key_count", "delta": 1},
            {"type": "set_observations", "text": "RAS"}
        ]);
        let list = events.as_array_mut().unwrap();
        for slot in ["compteur", "face-avant", "face-arriere", "cote-gauche", "cote-droit", "moteur",
            "carnet", "interieur", "coffre", "jantes"]
        {
            list.push(serde_json::json!({
                "type": "capture_photo", "phase": "departure", "slot": slot, "reference": slot
            }));
        }
        list.push(serde_json::json!({"type": "validate_departure"}));
        let events_path = temp.path().join("events.json");
        write_json(&events_path, &events).unwrap();

        run(Some(temp.path()), "mis-0005", &events_path, true).unwrap();

        let backend = JsonFileBackend::new(temp.path());
        assert_eq!(backend.lookup("MIS-0005").unwrap().status, MissionStatus::DepartureValidated);
        assert_eq!(backend.uploads("MIS-0005").unwrap().len(), 10);
    }
}
