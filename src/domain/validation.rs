//! Precondition checks for the two gated actions
//!
//! Each check reports the first unmet precondition, in a fixed order, so the
//! user is always told the next blocking step.

use crate::errors::{InspectionError, InspectionResult};
use crate::schemas::InspectionConfig;

use super::ledger::{ChecklistLedger, PhotoLedger};
use super::Phase;

/// Read-only view of everything the gate looks at
#[derive(Debug, Clone, Copy)]
pub struct GateContext<'a> {
    pub phase: Phase,
    pub departure_validated: bool,
    pub has_signature: bool,
    pub photos: &'a PhotoLedger,
    pub checklist: &'a ChecklistLedger,
    pub config: &'a InspectionConfig,
}

/// Fail with every still-empty required slot for `phase`, in declared order
pub fn check_photos(ctx: &GateContext<'_>, phase: Phase) -> InspectionResult<()> {
    let missing = ctx.photos.missing_slots(phase, ctx.config.required_slots(phase));
    if !missing.is_empty() {
        return Err(InspectionError::MissingPhotos { phase, slots: missing });
    }
    Ok(())
}

/// Validate "validate departure": checklist first, then departure photos.
pub fn can_validate_departure(ctx: &GateContext<'_>) -> InspectionResult<()> {
    ctx.checklist.check_complete()?;
    check_photos(ctx, Phase::Departure)
}

/// Validate "finalize".
///
/// Order: departure validated, arrival photos, arrival phase, signature.
pub fn can_finalize(ctx: &GateContext<'_>) -> InspectionResult<()> {
    if !ctx.departure_validated {
        return Err(InspectionError::DepartureNotValidated);
    }
    check_photos(ctx, Phase::Arrival)?;
    if ctx.phase != Phase::Arrival {
        return Err(InspectionError::WrongPhase {
            expected: Phase::Arrival,
            actual: ctx.phase,
        });
    }
    if !ctx.has_signature {
        return Err(InspectionError::MissingSignature);
    }
    Ok(())
}
