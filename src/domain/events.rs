//! Events delivered by the UI and what each one did

use serde::{Deserialize, Serialize};

use super::gate::Transition;
use super::Phase;

/// A discrete UI event. Events are applied one at a time, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InspectionEvent {
    /// Checklist key as sent by the form; unknown keys are rejected on apply
    SetChecklistItem {
        item: String,
        answer: crate::schemas::ChecklistAnswer,
    },
    AdjustKeyCount {
        delta: i32,
    },
    CapturePhoto {
        phase: Phase,
        slot: String,
        reference: String,
    },
    CaptureSignature {
        reference: String,
    },
    ClearSignature,
    SetObservations {
        text: String,
    },
    RequestPhase {
        target: Phase,
    },
    ValidateDeparture,
    Finalize,
    Reset,
}

/// What a successfully applied event changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    ChecklistUpdated { complete: bool },
    KeyCountUpdated { key_count: u32 },
    PhotoCaptured { phase: Phase, slot: String, first_capture: bool },
    SignatureCaptured,
    SignatureCleared,
    ObservationsUpdated,
    PhaseSelected { phase: Phase },
    Transitioned { transition: Transition },
    SessionReset,
}
