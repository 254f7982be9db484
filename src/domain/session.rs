//! The live inspection session
//!
//! One session exists per loaded mission. It owns the phase, the departure
//! lock, both ledgers, the signature and the observations. The UI holds the
//! session and passes it around explicitly; dropping it discards all
//! in-memory state.

use crate::errors::{EdlError, InspectionError, InspectionResult, Result};
use crate::schemas::{
    Checklist, ChecklistAnswer, ChecklistItem, InspectionConfig, InspectionPayload, Mission,
};

use super::events::{Effect, InspectionEvent};
use super::gate::{self, Transition};
use super::ledger::{ChecklistLedger, PhotoLedger, PhotoRef};
use super::phase::initial_phase_for_status;
use super::progress::{progress_of, InspectionProgress};
use super::validation::GateContext;
use super::Phase;

#[derive(Debug, Clone)]
pub struct InspectionSession {
    mission_id: String,
    config: InspectionConfig,
    phase: Phase,
    departure_validated: bool,
    photos: PhotoLedger,
    checklist: ChecklistLedger,
    signature: Option<String>,
    observations: String,
}

impl InspectionSession {
    /// Fresh session in departure, nothing captured
    pub fn new(mission_id: impl Into<String>, config: InspectionConfig) -> Self {
        let checklist = ChecklistLedger::new(config.require_key_count);
        InspectionSession {
            mission_id: mission_id.into(),
            config,
            phase: Phase::Departure,
            departure_validated: false,
            photos: PhotoLedger::new(),
            checklist,
            signature: None,
            observations: String::new(),
        }
    }

    /// Open a session on a loaded mission, starting where its status says.
    ///
    /// # Errors
    /// * `MissionCancelled` - If the mission is cancelled
    pub fn from_mission(mission: &Mission, config: InspectionConfig) -> Result<Self> {
        let (phase, validated) = initial_phase_for_status(mission.status)
            .ok_or_else(|| EdlError::MissionCancelled(mission.code.clone()))?;

        let mut session = InspectionSession::new(mission.id.clone(), config);
        if validated {
            session.lock_departure();
        }
        session.phase = phase;
        Ok(session)
    }

    pub fn mission_id(&self) -> &str {
        &self.mission_id
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_departure_validated(&self) -> bool {
        self.departure_validated
    }

    pub fn photos(&self) -> &PhotoLedger {
        &self.photos
    }

    pub fn checklist(&self) -> &Checklist {
        self.checklist.checklist()
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn observations(&self) -> &str {
        &self.observations
    }

    // ===== PHASE CONTROLLER =====

    /// Switch the visible phase.
    ///
    /// Arrival opens only after departure validation, and departure cannot be
    /// reopened once validated. Completed is reached through `finalize` only.
    ///
    /// # Errors
    /// * `PhaseLocked` - Arrival before validation, or departure after it
    /// * `IllegalTransition` - If `target` is completed
    /// * `SessionCompleted` - If the session is already completed
    pub fn request_phase(&mut self, target: Phase) -> InspectionResult<Phase> {
        if self.phase == Phase::Completed {
            return Err(InspectionError::SessionCompleted);
        }
        match target {
            Phase::Completed => Err(InspectionError::IllegalTransition {
                from: self.phase,
                to: target,
            }),
            Phase::Arrival if !self.departure_validated => Err(InspectionError::PhaseLocked),
            Phase::Departure if self.departure_validated => Err(InspectionError::PhaseLocked),
            _ => {
                self.phase = target;
                Ok(target)
            }
        }
    }

    /// See [`gate::validate_departure`].
    pub fn validate_departure(&mut self) -> InspectionResult<Transition> {
        gate::validate_departure(self)
    }

    /// See [`gate::finalize`].
    pub fn finalize(&mut self) -> InspectionResult<Transition> {
        gate::finalize(self)
    }

    /// Back to session-start defaults, keeping the mission and policy
    pub fn reset(&mut self) {
        let mission_id = std::mem::take(&mut self.mission_id);
        let config = self.config.clone();
        *self = InspectionSession::new(mission_id, config);
    }

    pub(super) fn lock_departure(&mut self) {
        self.departure_validated = true;
        self.photos.lock_departure();
        self.checklist.lock();
    }

    pub(super) fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(super) fn gate_context(&self) -> GateContext<'_> {
        GateContext {
            phase: self.phase,
            departure_validated: self.departure_validated,
            has_signature: self.signature.is_some(),
            photos: &self.photos,
            checklist: &self.checklist,
            config: &self.config,
        }
    }

    // ===== LEDGERS =====

    /// Record a checklist answer; returns whether the checklist is now complete.
    ///
    /// # Errors
    /// * `Locked` - After departure validation
    pub fn set_checklist_item(&mut self, item: ChecklistItem, answer: ChecklistAnswer) -> InspectionResult<bool> {
        self.checklist.set_item(item, answer)
    }

    /// Like `set_checklist_item`, for keys arriving as form strings.
    ///
    /// # Errors
    /// * `UnknownChecklistItem` - If `key` is not one of the five fixed keys
    /// * `Locked` - After departure validation
    pub fn set_checklist_key(&mut self, key: &str, answer: ChecklistAnswer) -> InspectionResult<bool> {
        let item: ChecklistItem = key.parse()?;
        self.set_checklist_item(item, answer)
    }

    /// Add `delta` keys (negative to remove), never below zero.
    ///
    /// # Errors
    /// * `Locked` - After departure validation
    pub fn adjust_key_count(&mut self, delta: i32) -> InspectionResult<u32> {
        self.checklist.adjust_key_count(delta)
    }

    pub fn is_checklist_complete(&self) -> bool {
        self.checklist.is_complete()
    }

    /// Record a capture; returns true for a first capture, false for a retake.
    ///
    /// # Errors
    /// * `Locked` - Departure slot after departure validation
    /// * `SessionCompleted` - Any capture once completed
    /// * `UnknownSlot` - Slot neither required for `phase` nor optional
    pub fn capture_photo(&mut self, phase: Phase, slot: &str, reference: PhotoRef) -> InspectionResult<bool> {
        if phase == Phase::Departure && self.departure_validated {
            return Err(InspectionError::Locked);
        }
        if self.phase == Phase::Completed {
            return Err(InspectionError::SessionCompleted);
        }
        if !self.config.accepts_slot(phase, slot) {
            return Err(InspectionError::UnknownSlot {
                phase,
                slot: slot.to_string(),
            });
        }
        self.photos.capture(phase, slot, reference)
    }

    /// Required slots for `phase` still empty, in configured order
    pub fn missing_slots(&self, phase: Phase) -> Vec<String> {
        self.photos.missing_slots(phase, self.config.required_slots(phase))
    }

    // ===== SIGNATURE & OBSERVATIONS =====

    /// # Errors
    /// * `WrongPhase` - Outside of arrival
    /// * `SessionCompleted` - Once completed
    pub fn set_signature(&mut self, reference: impl Into<String>) -> InspectionResult<()> {
        self.ensure_arrival()?;
        self.signature = Some(reference.into());
        Ok(())
    }

    /// # Errors
    /// * `WrongPhase` - Outside of arrival
    /// * `SessionCompleted` - Once completed
    pub fn clear_signature(&mut self) -> InspectionResult<()> {
        self.ensure_arrival()?;
        self.signature = None;
        Ok(())
    }

    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }

    /// # Errors
    /// * `SessionCompleted` - Once completed
    pub fn set_observations(&mut self, text: impl Into<String>) -> InspectionResult<()> {
        if self.phase == Phase::Completed {
            return Err(InspectionError::SessionCompleted);
        }
        self.observations = text.into();
        Ok(())
    }

    fn ensure_arrival(&self) -> InspectionResult<()> {
        match self.phase {
            Phase::Arrival => Ok(()),
            Phase::Completed => Err(InspectionError::SessionCompleted),
            actual => Err(InspectionError::WrongPhase {
                expected: Phase::Arrival,
                actual,
            }),
        }
    }

    // ===== QUERIES =====

    pub fn progress(&self) -> InspectionProgress {
        progress_of(self)
    }

    /// Snapshot for the collaborator's inspection save
    pub fn payload(&self) -> InspectionPayload {
        InspectionPayload {
            mission_id: self.mission_id.clone(),
            checklist: self.checklist.checklist().clone(),
            observations: self.observations.clone(),
            signature: self.signature.clone(),
            departure_validated: self.departure_validated,
        }
    }

    /// Apply one UI event.
    pub fn apply(&mut self, event: InspectionEvent) -> InspectionResult<Effect> {
        match event {
            InspectionEvent::SetChecklistItem { item, answer } => {
                let complete = self.set_checklist_key(&item, answer)?;
                Ok(Effect::ChecklistUpdated { complete })
            }
            InspectionEvent::AdjustKeyCount { delta } => {
                let key_count = self.adjust_key_count(delta)?;
                Ok(Effect::KeyCountUpdated { key_count })
            }
            InspectionEvent::CapturePhoto { phase, slot, reference } => {
                let first_capture = self.capture_photo(phase, &slot, PhotoRef(reference))?;
                Ok(Effect::PhotoCaptured { phase, slot, first_capture })
            }
            InspectionEvent::CaptureSignature { reference } => {
                self.set_signature(reference)?;
                Ok(Effect::SignatureCaptured)
            }
            InspectionEvent::ClearSignature => {
                self.clear_signature()?;
                Ok(Effect::SignatureCleared)
            }
            InspectionEvent::SetObservations { text } => {
                self.set_observations(text)?;
                Ok(Effect::ObservationsUpdated)
            }
            InspectionEvent::RequestPhase { target } => {
                let phase = self.request_phase(target)?;
                Ok(Effect::PhaseSelected { phase })
            }
            InspectionEvent::ValidateDeparture => {
                let transition = self.validate_departure()?;
                Ok(Effect::Transitioned { transition })
            }
            InspectionEvent::Finalize => {
                let transition = self.finalize()?;
                Ok(Effect::Transitioned { transition })
            }
            InspectionEvent::Reset => {
                self.reset();
                Ok(Effect::SessionReset)
            }
        }
    }
}
