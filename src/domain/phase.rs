//! Inspection phase definitions
//!
//! The phase machine is linear:
//! departure → arrival → completed

use serde::{Deserialize, Serialize};

use crate::schemas::MissionStatus;

/// Inspection sub-stage of the live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pickup inspection: checklist and departure photos
    Departure,
    /// Drop-off inspection: arrival photos and client signature
    Arrival,
    /// Finalized; terminal for the session
    Completed,
}

/// The canonical ordering of phases.
pub const PHASES: &[Phase] = &[Phase::Departure, Phase::Arrival, Phase::Completed];

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Departure => write!(f, "departure"),
            Phase::Arrival => write!(f, "arrival"),
            Phase::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "departure" => Ok(Phase::Departure),
            "arrival" => Ok(Phase::Arrival),
            "completed" => Ok(Phase::Completed),
            _ => Err(format!("Unknown phase: {}", s)),
        }
    }
}

/// Starting point of a session opened on a mission with the given status.
///
/// Returns `(phase, departure_validated)`, or None for cancelled missions,
/// which cannot be inspected.
pub fn initial_phase_for_status(status: MissionStatus) -> Option<(Phase, bool)> {
    match status {
        MissionStatus::Pending | MissionStatus::InProgress => Some((Phase::Departure, false)),
        MissionStatus::DepartureValidated => Some((Phase::Arrival, true)),
        MissionStatus::Completed => Some((Phase::Completed, true)),
        MissionStatus::Cancelled => None,
    }
}

/// Status string to persist after the session enters `phase` through a gated transition.
pub fn status_for_phase(phase: Phase) -> Option<MissionStatus> {
    match phase {
        Phase::Departure => None,
        Phase::Arrival => Some(MissionStatus::DepartureValidated),
        Phase::Completed => Some(MissionStatus::Completed),
    }
}
