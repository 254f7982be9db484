//! Inspection workflow core: phases, ledgers and the finalization gate

mod events;
mod gate;
mod ledger;
mod phase;
mod progress;
mod session;
mod validation;


pub use events::{Effect, InspectionEvent};
pub use gate::{finalize, validate_departure, Transition};
pub use ledger::{Capture, ChecklistLedger, PhotoLedger, PhotoRef};
pub use phase::{initial_phase_for_status, status_for_phase, Phase, PHASES};
pub use progress::{progress_of, InspectionProgress};
pub use session::InspectionSession;
pub use validation::{can_finalize, can_validate_departure, check_photos, GateContext};
