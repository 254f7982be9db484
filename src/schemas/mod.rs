//! Schema types for missions, inspection policy and the checklist
//!
//! All types serialize to the JSON shapes exchanged with the mission backend.

mod checklist;
mod config;
mod mission;
mod payload;

pub use checklist::{Checklist, ChecklistAnswer, ChecklistItem, CHECKLIST_ITEMS};
pub use config::InspectionConfig;
pub use mission::{
    mission_code_for, normalize_mission_code, Mission, MissionStats, MissionStatus, NewMission,
};
pub use payload::InspectionPayload;
