//! In-memory backend with failure injection

use std::collections::HashMap;

use crate::errors::{EdlError, Result};
use crate::schemas::{mission_code_for, InspectionPayload, Mission, MissionStatus, NewMission};

use super::{MissionBackend, PhotoUpload};

/// Missions held in a map; every write is recorded for inspection.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    missions: HashMap<String, Mission>,
    status_writes: Vec<(String, MissionStatus)>,
    uploads: Vec<PhotoUpload>,
    saved: Vec<InspectionPayload>,
    fail_writes: bool,
    fail_uploads: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a backend holding `mission`, keyed by its code
    pub fn with_mission(mut self, mission: Mission) -> Self {
        self.insert(mission);
        self
    }

    pub fn insert(&mut self, mission: Mission) {
        self.missions.insert(mission.code.clone(), mission);
    }

    /// Make status and inspection writes fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make photo uploads fail
    pub fn set_fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }

    /// (mission id, status) pairs persisted so far
    pub fn status_writes(&self) -> &[(String, MissionStatus)] {
        &self.status_writes
    }

    pub fn uploads(&self) -> &[PhotoUpload] {
        &self.uploads
    }

    pub fn saved_payloads(&self) -> &[InspectionPayload] {
        &self.saved
    }
}

impl MissionBackend for MemoryBackend {
    fn lookup(&self, code: &str) -> Result<Mission> {
        self.missions
            .get(code)
            .cloned()
            .ok_or_else(|| EdlError::NotFound(code.to_string()))
    }

    fn create(&mut self, draft: NewMission) -> Result<Mission> {
        if self.fail_writes {
            return Err(EdlError::Backend("mission creation rejected".to_string()));
        }
        let mut sequence = self.missions.len() as u64 + 1;
        let mut code = mission_code_for(sequence)?;
        while self.missions.contains_key(&code) {
            sequence += 1;
            code = mission_code_for(sequence)?;
        }
        let mission = Mission::from_draft(sequence.to_string(), code, draft);
        self.insert(mission.clone());
        Ok(mission)
    }

    fn list(&self) -> Result<Vec<Mission>> {
        let mut missions: Vec<Mission> = self.missions.values().cloned().collect();
        missions.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(missions)
    }

    fn persist_status(&mut self, mission: &Mission, status: MissionStatus) -> Result<()> {
        if self.fail_writes {
            return Err(EdlError::Backend("status update rejected".to_string()));
        }
        if let Some(stored) = self.missions.get_mut(&mission.code) {
            stored.status = status;
        }
        self.status_writes.push((mission.id.clone(), status));
        Ok(())
    }

    fn upload_photo(&mut self, _mission: &Mission, upload: &PhotoUpload) -> Result<()> {
        if self.fail_uploads {
            return Err(EdlError::Backend(format!("upload of {} failed", upload.slot)));
        }
        self.uploads.push(upload.clone());
        Ok(())
    }

    fn save_inspection(&mut self, _mission: &Mission, payload: &InspectionPayload) -> Result<()> {
        if self.fail_writes {
            return Err(EdlError::Backend("inspection save rejected".to_string()));
        }
        self.saved.push(payload.clone());
        Ok(())
    }
}
