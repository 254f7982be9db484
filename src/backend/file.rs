//! JSON-file backend rooted at a `.edl` data directory

use std::path::{Path, PathBuf};

use crate::errors::{EdlError, Result};
use crate::fs;
use crate::schemas::{mission_code_for, InspectionPayload, Mission, MissionStatus, NewMission};

use super::{MissionBackend, PhotoUpload};

/// Missions stored as `.edl/missions/<CODE>/mission.json`.
///
/// Photo hand-offs are appended to `photos.json` and inspection snapshots
/// replace `inspection.json`, both next to the mission record.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileBackend { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Photo hand-offs recorded for a mission, oldest first
    pub fn uploads(&self, code: &str) -> Result<Vec<PhotoUpload>> {
        match fs::read_json(&fs::get_photos_path(&self.root, code)) {
            Ok(uploads) => Ok(uploads),
            Err(EdlError::FileNotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

impl MissionBackend for JsonFileBackend {
    fn lookup(&self, code: &str) -> Result<Mission> {
        fs::read_mission(&self.root, code)
    }

    fn create(&mut self, draft: NewMission) -> Result<Mission> {
        let mut sequence = fs::list_missions(&self.root)?.len() as u64 + 1;
        let mut code = mission_code_for(sequence)?;
        while fs::get_mission_dir(&self.root, &code).exists() {
            sequence += 1;
            code = mission_code_for(sequence)?;
        }
        let mission = Mission::from_draft(sequence.to_string(), code, draft);
        fs::write_mission(&self.root, &mission)?;
        tracing::info!(mission = %mission.code, "mission created");
        Ok(mission)
    }

    fn list(&self) -> Result<Vec<Mission>> {
        fs::list_missions(&self.root)
    }

    fn persist_status(&mut self, mission: &Mission, status: MissionStatus) -> Result<()> {
        let stored = fs::read_mission(&self.root, &mission.code)?;
        fs::write_mission(&self.root, &stored.with_status(status))
    }

    fn upload_photo(&mut self, mission: &Mission, upload: &PhotoUpload) -> Result<()> {
        let mut uploads = self.uploads(&mission.code)?;
        uploads.push(upload.clone());
        fs::write_json(&fs::get_photos_path(&self.root, &mission.code), &uploads)
    }

    fn save_inspection(&mut self, mission: &Mission, payload: &InspectionPayload) -> Result<()> {
        fs::write_inspection(&self.root, &mission.code, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Phase, PhotoRef};
    use crate::schemas::Checklist;
    use tempfile::TempDir;

    fn seeded() -> (TempDir, JsonFileBackend, Mission) {
        let temp = TempDir::new().unwrap();
        let mission = Mission::new("12".to_string(), "MIS-0012".to_string());
        fs::write_mission(temp.path(), &mission).unwrap();
        let backend = JsonFileBackend::new(temp.path());
        (temp, backend, mission)
    }

    #[test]
    fn test_lookup_missing_is_not_found() {
        let (_temp, backend, _) = seeded();
        assert!(matches!(backend.lookup("MIS-9999"), Err(EdlError::NotFound(_))));
    }

    #[test]
    fn test_persist_status_round_trip() {
        let (_temp, mut backend, mission) = seeded();
        backend.persist_status(&mission, MissionStatus::Completed).unwrap();

        let stored = backend.lookup("MIS-0012").unwrap();
        assert_eq!(stored.status, MissionStatus::Completed);
        assert!(stored.updated_at >= mission.updated_at);
    }

    #[test]
    fn test_uploads_are_appended() {
        let (_temp, mut backend, mission) = seeded();
        assert!(backend.uploads("MIS-0012").unwrap().is_empty());

        backend
            .upload_photo(&mission, &PhotoUpload::new(Phase::Departure, "compteur", &PhotoRef::new("a")))
            .unwrap();
        backend
            .upload_photo(&mission, &PhotoUpload::new(Phase::Departure, "compteur", &PhotoRef::new("b")))
            .unwrap();

        let uploads = backend.uploads("MIS-0012").unwrap();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[1].reference, PhotoRef::new("b"));
    }

    #[test]
    fn test_save_inspection_writes_payload() {
        let (temp, mut backend, mission) = seeded();
        let payload = InspectionPayload {
            mission_id: "12".to_string(),
            checklist: Checklist::default(),
            observations: "pare-choc rayé".to_string(),
            signature: None,
            departure_validated: false,
        };
        backend.save_inspection(&mission, &payload).unwrap();

        let read: InspectionPayload =
            fs::read_json(&fs::get_inspection_path(temp.path(), "MIS-0012")).unwrap();
        assert_eq!(read, payload);
    }

    #[test]
    fn test_create_writes_pending_mission() {
        let (_temp, mut backend, _) = seeded();
        let draft = NewMission {
            vehicle_brand: Some("Peugeot".to_string()),
            internal_notes: Some("clés à l'accueil".to_string()),
            ..NewMission::default()
        };

        let created = backend.create(draft).unwrap();
        assert_eq!(created.code, "MIS-0002");
        assert_eq!(created.status, MissionStatus::Pending);

        let stored = backend.lookup("MIS-0002").unwrap();
        assert_eq!(stored, created);
    }

    #[test]
    fn test_stats_reads_every_mission() {
        let (_temp, mut backend, mission) = seeded();
        backend.create(NewMission::default()).unwrap();
        backend.persist_status(&mission, MissionStatus::InProgress).unwrap();

        let stats = backend.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.pending, 1);
    }
}
