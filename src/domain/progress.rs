//! Inspection progress shown on the provider's step bar

use serde::Serialize;

use super::session::InspectionSession;
use super::Phase;

/// Progress of the live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InspectionProgress {
    /// 1 departure, 2 arrival photos outstanding, 3 arrival photos done, 4 completed
    pub step: u8,
    /// Required slots satisfied across both phases
    pub captured: usize,
    /// Required slots across both phases
    pub required: usize,
    /// `captured / required`, as a whole percentage
    pub percent: u8,
}

/// Derive the step bar state from a session.
///
/// Validated departure slots count as satisfied even when the session was
/// reopened from a persisted status and holds no departure captures.
pub fn progress_of(session: &InspectionSession) -> InspectionProgress {
    let config = session.config();
    let departure_required = config.required_slots(Phase::Departure);
    let arrival_required = config.required_slots(Phase::Arrival);

    let departure_captured = if session.is_departure_validated() {
        departure_required.len()
    } else {
        session.photos().captured_count(Phase::Departure, departure_required)
    };
    let arrival_captured = session.photos().captured_count(Phase::Arrival, arrival_required);

    let step = match session.phase() {
        Phase::Departure => 1,
        Phase::Arrival if arrival_captured < arrival_required.len() => 2,
        Phase::Arrival => 3,
        Phase::Completed => 4,
    };

    let captured = departure_captured + arrival_captured;
    let required = departure_required.len() + arrival_required.len();
    let percent = if session.phase() == Phase::Completed || required == 0 {
        100
    } else {
        (captured * 100 / required) as u8
    };

    InspectionProgress {
        step,
        captured,
        required,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhotoRef;
    use crate::schemas::{InspectionConfig, Mission, MissionStatus};

    #[test]
    fn test_fresh_session_progress() {
        let session = InspectionSession::new("m-1", InspectionConfig::default());
        let progress = progress_of(&session);
        assert_eq!(progress.step, 1);
        assert_eq!(progress.captured, 0);
        assert_eq!(progress.required, 13);
        assert_eq!(progress.percent, 0);
    }

    #[test]
    fn test_partial_departure_progress() {
        let mut session = InspectionSession::new("m-1", InspectionConfig::default());
        session.capture_photo(Phase::Departure, "compteur", PhotoRef::new("a")).unwrap();
        session.capture_photo(Phase::Departure, "moteur", PhotoRef::new("b")).unwrap();

        let progress = progress_of(&session);
        assert_eq!(progress.captured, 2);
        assert_eq!(progress.percent, 15);
    }

    #[test]
    fn test_reopened_arrival_progress() {
        let mission = Mission::new("1".to_string(), "MIS-0001".to_string())
            .with_status(MissionStatus::DepartureValidated);
        let mut session = InspectionSession::from_mission(&mission, InspectionConfig::default()).unwrap();
        assert_eq!(progress_of(&session).step, 2);
        assert_eq!(progress_of(&session).captured, 10);

        for slot in ["compteur", "face-avant", "face-arriere"] {
            session.capture_photo(Phase::Arrival, slot, PhotoRef::new(slot)).unwrap();
        }
        let progress = progress_of(&session);
        assert_eq!(progress.step, 3);
        assert_eq!(progress.percent, 100);
    }

    #[test]
    fn test_completed_progress() {
        let mission = Mission::new("1".to_string(), "MIS-0001".to_string())
            .with_status(MissionStatus::Completed);
        let session = InspectionSession::from_mission(&mission, InspectionConfig::default()).unwrap();
        let progress = progress_of(&session);
        assert_eq!(progress.step, 4);
        assert_eq!(progress.percent, 100);
    }
}
