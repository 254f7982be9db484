//! Mission backend collaborator
//!
//! The inspection core never talks to storage or the network directly. It
//! reads missions through `MissionBackend::lookup` and reports phase changes,
//! photo captures and inspection saves back through the same trait. Mission
//! creation and dashboard counts go through it as well. Every
//! call is best-effort from the core's point of view: a failure is reported
//! to the caller and never rolls back session state.

mod file;
mod memory;

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

use serde::{Deserialize, Serialize};

use crate::domain::{Phase, PhotoRef};
use crate::errors::Result;
use crate::schemas::{InspectionPayload, Mission, MissionStats, MissionStatus, NewMission};

/// One photo handed to the uploader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub phase: Phase,
    pub slot: String,
    pub reference: PhotoRef,
    /// ISO 8601 timestamp of the hand-off
    pub uploaded_at: String,
}

impl PhotoUpload {
    pub fn new(phase: Phase, slot: &str, reference: &PhotoRef) -> Self {
        PhotoUpload {
            phase,
            slot: slot.to_string(),
            reference: reference.clone(),
            uploaded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Storage and transport behind the inspection workflow
pub trait MissionBackend {
    /// Look up a mission by its normalized code.
    ///
    /// # Errors
    /// * `NotFound` - If no mission has this code
    fn lookup(&self, code: &str) -> Result<Mission>;

    /// Register a new mission, assigning its id and code. It starts as `pending`.
    fn create(&mut self, draft: NewMission) -> Result<Mission>;

    /// Every stored mission, ordered by code
    fn list(&self) -> Result<Vec<Mission>>;

    /// Mission counts per status
    fn stats(&self) -> Result<MissionStats> {
        Ok(MissionStats::tally(&self.list()?))
    }

    /// Persist a new mission status after a gated transition
    fn persist_status(&mut self, mission: &Mission, status: MissionStatus) -> Result<()>;

    /// Hand a captured photo to the uploader
    fn upload_photo(&mut self, mission: &Mission, upload: &PhotoUpload) -> Result<()>;

    /// Save the free text, checklist and signature snapshot
    fn save_inspection(&mut self, mission: &Mission, payload: &InspectionPayload) -> Result<()>;
}
