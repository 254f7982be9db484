//! Finalization gate
//!
//! The only place the two gated actions are decided and applied. Both read
//! the session, run the ordered checks from `validation`, and on success
//! perform the phase change.

use serde::Serialize;

use crate::errors::InspectionResult;

use super::session::InspectionSession;
use super::validation::{can_finalize, can_validate_departure};
use super::Phase;

/// Result of a successful gated action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// The session moved to a new phase
    Advanced { from: Phase, to: Phase },
    /// Already past this gate; nothing changed
    Unchanged { phase: Phase },
}

impl Transition {
    /// Check if the action changed the phase
    pub fn is_advanced(&self) -> bool {
        matches!(self, Transition::Advanced { .. })
    }

    /// Phase the session is in after the action
    pub fn phase(&self) -> Phase {
        match self {
            Transition::Advanced { to, .. } => *to,
            Transition::Unchanged { phase } => *phase,
        }
    }
}

/// Validate the departure inspection, lock departure data and move to arrival.
///
/// Calling this again once validated succeeds with `Unchanged` and has no
/// further effect.
///
/// # Errors
/// * `ChecklistIncomplete` - If a checklist key is unset or no key was handed over
/// * `MissingPhotos` - If required departure slots are still empty
pub fn validate_departure(session: &mut InspectionSession) -> InspectionResult<Transition> {
    if session.is_departure_validated() {
        return Ok(Transition::Unchanged { phase: session.phase() });
    }

    can_validate_departure(&session.gate_context())?;

    let from = session.phase();
    session.lock_departure();
    session.enter_phase(Phase::Arrival);
    tracing::info!(mission = %session.mission_id(), "departure validated");

    Ok(Transition::Advanced { from, to: Phase::Arrival })
}

/// Finalize the mission and move to completed.
///
/// # Errors
/// The first unmet precondition, in this order:
/// * `DepartureNotValidated`
/// * `MissingPhotos` - Every still-empty arrival slot
/// * `WrongPhase` - If not in arrival
/// * `MissingSignature`
pub fn finalize(session: &mut InspectionSession) -> InspectionResult<Transition> {
    can_finalize(&session.gate_context())?;

    session.enter_phase(Phase::Completed);
    tracing::info!(mission = %session.mission_id(), "inspection finalized");

    Ok(Transition::Advanced { from: Phase::Arrival, to: Phase::Completed })
}
