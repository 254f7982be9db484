//! Inspection payload - The snapshot handed to the collaborator for saving

use serde::{Deserialize, Serialize};

use super::Checklist;

/// Free text, checklist and signature of the live session.
///
/// Produced on demand for the collaborator's debounced save; the core never
/// schedules the save itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionPayload {
    pub mission_id: String,
    pub checklist: Checklist,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub signature: Option<String>,
    pub departure_validated: bool,
}
