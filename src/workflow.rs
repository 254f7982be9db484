//! Inspection workflow driver
//!
//! Binds at most one live session to a mission backend. Events are applied
//! to the session first; collaborator calls follow and can only add
//! warnings, never undo local state.

use serde::Serialize;

use crate::backend::{MissionBackend, PhotoUpload};
use crate::domain::{
    status_for_phase, Effect, InspectionEvent, InspectionSession, Phase, PhotoRef, Transition,
};
use crate::errors::{EdlError, InspectionError, Result};
use crate::schemas::{normalize_mission_code, InspectionConfig, Mission};

/// What applying one event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    /// The session's verdict on the event
    pub effect: std::result::Result<Effect, InspectionError>,
    /// Non-fatal collaborator failures
    pub warnings: Vec<String>,
}

impl EventOutcome {
    pub fn is_success(&self) -> bool {
        self.effect.is_ok()
    }
}

/// Serializable form of an outcome for CLI/UI rendering
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl From<&EventOutcome> for OutcomeReport {
    fn from(outcome: &EventOutcome) -> Self {
        match &outcome.effect {
            Ok(effect) => OutcomeReport {
                ok: true,
                effect: Some(effect.clone()),
                error_code: None,
                message: None,
                warnings: outcome.warnings.clone(),
            },
            Err(err) => OutcomeReport {
                ok: false,
                effect: None,
                error_code: Some(err.code()),
                message: Some(err.to_string()),
                warnings: outcome.warnings.clone(),
            },
        }
    }
}

pub struct InspectionWorkflow<B: MissionBackend> {
    backend: B,
    config: InspectionConfig,
    mission: Option<Mission>,
    session: Option<InspectionSession>,
}

impl<B: MissionBackend> InspectionWorkflow<B> {
    pub fn new(backend: B, config: InspectionConfig) -> Self {
        InspectionWorkflow {
            backend,
            config,
            mission: None,
            session: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    pub fn session(&self) -> Option<&InspectionSession> {
        self.session.as_ref()
    }

    /// Load a mission by code and start a session on it.
    ///
    /// Any session already open is discarded first.
    ///
    /// # Errors
    /// * `InvalidMissionCode` - If the code is malformed
    /// * `NotFound` - If the backend has no such mission
    /// * `MissionCancelled` - If the mission is cancelled
    pub fn open(&mut self, code: &str) -> Result<&InspectionSession> {
        let code = normalize_mission_code(code)?;
        self.close();

        let mission = self.backend.lookup(&code)?;
        let session = InspectionSession::from_mission(&mission, self.config.clone())?;
        tracing::info!(
            mission = %mission.code,
            status = %mission.status,
            phase = %session.phase(),
            "inspection session opened"
        );

        self.mission = Some(mission);
        Ok(self.session.insert(session))
    }

    /// Drop the live session without saving anything
    pub fn close(&mut self) -> Option<InspectionSession> {
        if let Some(mission) = self.mission.take() {
            tracing::debug!(mission = %mission.code, "inspection session discarded");
        }
        self.session.take()
    }

    /// Apply one event to the live session, then notify the backend.
    ///
    /// A capture is handed to the uploader. A gated transition persists the
    /// new status; finalization saves the inspection payload first.
    ///
    /// # Errors
    /// * `NoActiveSession` - If no mission is open
    pub fn apply(&mut self, event: InspectionEvent) -> Result<EventOutcome> {
        let (session, mission) = match (self.session.as_mut(), self.mission.as_mut()) {
            (Some(session), Some(mission)) => (session, mission),
            _ => return Err(EdlError::NoActiveSession),
        };

        let capture_ref = match &event {
            InspectionEvent::CapturePhoto { reference, .. } => Some(PhotoRef::new(reference.as_str())),
            _ => None,
        };

        let effect = session.apply(event);
        let mut warnings = Vec::new();

        match &effect {
            Ok(Effect::PhotoCaptured { phase, slot, .. }) => {
                if let Some(reference) = capture_ref {
                    let upload = PhotoUpload::new(*phase, slot, &reference);
                    if let Err(e) = self.backend.upload_photo(mission, &upload) {
                        tracing::warn!(mission = %mission.code, slot = %slot, error = %e, "photo upload failed");
                        warnings.push(format!("Photo {} kept locally but not uploaded: {}", slot, e));
                    }
                }
            }
            Ok(Effect::Transitioned { transition: Transition::Advanced { to, .. } }) => {
                if *to == Phase::Completed {
                    if let Err(e) = self.backend.save_inspection(mission, &session.payload()) {
                        tracing::warn!(mission = %mission.code, error = %e, "inspection not saved");
                        warnings.push(format!("Observations and signature not saved: {}", e));
                    }
                }
                if let Some(status) = status_for_phase(*to) {
                    match self.backend.persist_status(mission, status) {
                        Ok(()) => {
                            *mission = mission.clone().with_status(status);
                        }
                        Err(e) => {
                            tracing::warn!(mission = %mission.code, status = %status, error = %e, "status not persisted");
                            warnings.push(format!("Status {} not saved: {}", status, e));
                        }
                    }
                }
            }
            Ok(effect) => {
                tracing::debug!(mission = %mission.code, ?effect, "event applied");
            }
            Err(e) => {
                tracing::debug!(mission = %mission.code, code = e.code(), "event rejected");
            }
        }

        Ok(EventOutcome { effect, warnings })
    }

    /// Push the current checklist, observations and signature to the backend.
    ///
    /// # Errors
    /// * `NoActiveSession` - If no mission is open
    /// * `Backend` - If the save failed; the session is unaffected
    pub fn save_inspection(&mut self) -> Result<()> {
        let (session, mission) = match (self.session.as_ref(), self.mission.as_ref()) {
            (Some(session), Some(mission)) => (session, mission),
            _ => return Err(EdlError::NoActiveSession),
        };
        self.backend.save_inspection(mission, &session.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::schemas::{ChecklistAnswer, MissionStatus, CHECKLIST_ITEMS};

    fn workflow_with(status: MissionStatus) -> InspectionWorkflow<MemoryBackend> {
        let mission = Mission::new("21".to_string(), "MIS-0021".to_string()).with_status(status);
        InspectionWorkflow::new(MemoryBackend::new().with_mission(mission), InspectionConfig::default())
    }

    fn departure_events(config: &InspectionConfig) -> Vec<InspectionEvent> {
        let mut events: Vec<InspectionEvent> = CHECKLIST_ITEMS
            .iter()
            .map(|item| InspectionEvent::SetChecklistItem {
                item: item.to_string(),
                answer: ChecklistAnswer::Yes,
            })
            .collect();
        events.push(InspectionEvent::AdjustKeyCount { delta: 2 });
        for slot in &config.departure_slots {
            events.push(InspectionEvent::CapturePhoto {
                phase: Phase::Departure,
                slot: slot.clone(),
                reference: format!("dep-{}", slot),
            });
        }
        events
    }

    #[test]
    fn test_open_normalizes_code() {
        let mut workflow = workflow_with(MissionStatus::Pending);
        let session = workflow.open(" mis-0021 ").unwrap();
        assert_eq!(session.phase(), Phase::Departure);
        assert_eq!(workflow.mission().unwrap().code, "MIS-0021");
    }

    #[test]
    fn test_open_unknown_code() {
        let mut workflow = workflow_with(MissionStatus::Pending);
        assert!(matches!(workflow.open("MIS-9999"), Err(EdlError::NotFound(_))));
        assert!(workflow.session().is_none());
    }

    #[test]
    fn test_open_cancelled_mission() {
        let mut workflow = workflow_with(MissionStatus::Cancelled);
        assert!(matches!(workflow.open("MIS-0021"), Err(EdlError::MissionCancelled(_))));
    }

    #[test]
    fn test_apply_without_session() {
        let mut workflow = workflow_with(MissionStatus::Pending);
        let err = workflow.apply(InspectionEvent::Finalize).unwrap_err();
        assert!(matches!(err, EdlError::NoActiveSession));
    }

    #[test]
    fn test_departure_validation_persists_status() {
        let mut workflow = workflow_with(MissionStatus::InProgress);
        workflow.open("MIS-0021").unwrap();
        for event in departure_events(&InspectionConfig::default()) {
            assert!(workflow.apply(event).unwrap().is_success());
        }
        assert_eq!(workflow.backend().uploads().len(), 10);

        let outcome = workflow.apply(InspectionEvent::ValidateDeparture).unwrap();
        assert!(outcome.warnings.is_empty());
        assert_eq!(
            workflow.backend().status_writes(),
            &[("21".to_string(), MissionStatus::DepartureValidated)]
        );
        assert_eq!(workflow.mission().unwrap().status, MissionStatus::DepartureValidated);

        // Repeated validation does not persist again
        let outcome = workflow.apply(InspectionEvent::ValidateDeparture).unwrap();
        assert!(outcome.is_success());
        assert_eq!(workflow.backend().status_writes().len(), 1);
    }

    #[test]
    fn test_failed_upload_keeps_capture() {
        let mut workflow = workflow_with(MissionStatus::Pending);
        workflow.open("MIS-0021").unwrap();
        workflow.backend_mut().set_fail_uploads(true);

        let outcome = workflow
            .apply(InspectionEvent::CapturePhoto {
                phase: Phase::Departure,
                slot: "compteur".to_string(),
                reference: "img".to_string(),
            })
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(workflow.session().unwrap().photos().is_captured(Phase::Departure, "compteur"));
    }

    #[test]
    fn test_failed_status_write_still_advances() {
        let mut workflow = workflow_with(MissionStatus::DepartureValidated);
        workflow.open("MIS-0021").unwrap();
        for slot in ["compteur", "face-avant", "face-arriere"] {
            workflow
                .apply(InspectionEvent::CapturePhoto {
                    phase: Phase::Arrival,
                    slot: slot.to_string(),
                    reference: format!("arr-{}", slot),
                })
                .unwrap();
        }
        workflow
            .apply(InspectionEvent::CaptureSignature { reference: "sig".to_string() })
            .unwrap();
        workflow.backend_mut().set_fail_writes(true);

        let outcome = workflow.apply(InspectionEvent::Finalize).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[0].contains("signature"));
        assert!(outcome.warnings[1].contains("completed"));
        assert_eq!(workflow.session().unwrap().phase(), Phase::Completed);
        assert_eq!(workflow.mission().unwrap().status, MissionStatus::DepartureValidated);
        assert!(workflow.backend().status_writes().is_empty());
        assert!(workflow.backend().saved_payloads().is_empty());
    }

    #[test]
    fn test_finalize_saves_inspection_before_status() {
        let mut workflow = workflow_with(MissionStatus::DepartureValidated);
        workflow.open("MIS-0021").unwrap();
        for slot in ["compteur", "face-avant", "face-arriere"] {
            workflow
                .apply(InspectionEvent::CapturePhoto {
                    phase: Phase::Arrival,
                    slot: slot.to_string(),
                    reference: format!("arr-{}", slot),
                })
                .unwrap();
        }
        workflow
            .apply(InspectionEvent::SetObservations { text: "Rayure pare-choc".to_string() })
            .unwrap();
        workflow
            .apply(InspectionEvent::CaptureSignature { reference: "sig-client".to_string() })
            .unwrap();
        assert!(workflow.backend().saved_payloads().is_empty());

        let outcome = workflow.apply(InspectionEvent::Finalize).unwrap();
        assert!(outcome.is_success());
        assert!(outcome.warnings.is_empty());

        let saved = workflow.backend().saved_payloads();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].signature.as_deref(), Some("sig-client"));
        assert_eq!(saved[0].observations, "Rayure pare-choc");
        assert!(saved[0].departure_validated);
        assert_eq!(
            workflow.backend().status_writes(),
            &[("21".to_string(), MissionStatus::Completed)]
        );
    }

    #[test]
    fn test_rejected_finalize_saves_nothing() {
        let mut workflow = workflow_with(MissionStatus::DepartureValidated);
        workflow.open("MIS-0021").unwrap();

        let outcome = workflow.apply(InspectionEvent::Finalize).unwrap();
        assert!(matches!(outcome.effect, Err(InspectionError::MissingPhotos { .. })));
        assert!(workflow.backend().saved_payloads().is_empty());
    }

    #[test]
    fn test_rejected_event_has_no_backend_calls() {
        let mut workflow = workflow_with(MissionStatus::Pending);
        workflow.open("MIS-0021").unwrap();

        let outcome = workflow.apply(InspectionEvent::ValidateDeparture).unwrap();
        assert!(matches!(outcome.effect, Err(InspectionError::ChecklistIncomplete { .. })));
        assert!(workflow.backend().status_writes().is_empty());

        let report = OutcomeReport::from(&outcome);
        assert!(!report.ok);
        assert_eq!(report.error_code, Some("CHECKLIST_INCOMPLETE"));
    }

    #[test]
    fn test_save_inspection() {
        let mut workflow = workflow_with(MissionStatus::Pending);
        workflow.open("MIS-0021").unwrap();
        workflow
            .apply(InspectionEvent::SetObservations { text: "RAS".to_string() })
            .unwrap();

        workflow.save_inspection().unwrap();
        assert_eq!(workflow.backend().saved_payloads()[0].observations, "RAS");
    }

    #[test]
    fn test_close_discards_session() {
        let mut workflow = workflow_with(MissionStatus::Pending);
        workflow.open("MIS-0021").unwrap();
        assert!(workflow.close().is_some());
        assert!(workflow.session().is_none());
        assert!(workflow.mission().is_none());
    }
}
