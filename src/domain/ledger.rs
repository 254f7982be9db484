//! Checklist and photo ledgers
//!
//! Both ledgers record capture/selection state and refuse writes to
//! departure data once it has been locked. Locking never deletes anything.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{InspectionError, InspectionResult};
use crate::schemas::{Checklist, ChecklistAnswer, ChecklistItem};

use super::Phase;

/// Opaque reference to a captured file, handed back to the uploader unchanged
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(pub String);

impl PhotoRef {
    pub fn new(reference: impl Into<String>) -> Self {
        PhotoRef(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A captured slot. An absent entry is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub reference: PhotoRef,
    pub captured_at: DateTime<Utc>,
}

/// Photo captures keyed by (phase, slot)
#[derive(Debug, Clone, Default)]
pub struct PhotoLedger {
    entries: HashMap<(Phase, String), Capture>,
    departure_locked: bool,
}

impl PhotoLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `reference` at (phase, slot), overwriting any earlier capture.
    ///
    /// Returns true if the slot was empty before this call.
    ///
    /// # Errors
    /// * `Locked` - If departure slots are locked and `phase` is departure
    pub fn capture(&mut self, phase: Phase, slot: &str, reference: PhotoRef) -> InspectionResult<bool> {
        if phase == Phase::Departure && self.departure_locked {
            return Err(InspectionError::Locked);
        }
        let capture = Capture {
            reference,
            captured_at: Utc::now(),
        };
        let previous = self.entries.insert((phase, slot.to_string()), capture);
        Ok(previous.is_none())
    }

    pub fn get(&self, phase: Phase, slot: &str) -> Option<&Capture> {
        self.entries.get(&(phase, slot.to_string()))
    }

    pub fn is_captured(&self, phase: Phase, slot: &str) -> bool {
        self.get(phase, slot).is_some()
    }

    /// Required slots not yet captured, in the order of `required`
    pub fn missing_slots(&self, phase: Phase, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|slot| !self.is_captured(phase, slot))
            .cloned()
            .collect()
    }

    /// Number of required slots captured
    pub fn captured_count(&self, phase: Phase, required: &[String]) -> usize {
        required.iter().filter(|slot| self.is_captured(phase, slot)).count()
    }

    /// Make departure captures read-only for the rest of the session
    pub fn lock_departure(&mut self) {
        self.departure_locked = true;
    }

    /// All captures for a phase, sorted by slot id
    pub fn captures(&self, phase: Phase) -> Vec<(&str, &Capture)> {
        let mut captures: Vec<(&str, &Capture)> = self
            .entries
            .iter()
            .filter(|((p, _), _)| *p == phase)
            .map(|((_, slot), capture)| (slot.as_str(), capture))
            .collect();
        captures.sort_by(|a, b| a.0.cmp(b.0));
        captures
    }
}

/// The session-wide checklist plus its lock
#[derive(Debug, Clone)]
pub struct ChecklistLedger {
    checklist: Checklist,
    locked: bool,
    require_key_count: bool,
}

impl ChecklistLedger {
    pub fn new(require_key_count: bool) -> Self {
        ChecklistLedger {
            checklist: Checklist::default(),
            locked: false,
            require_key_count,
        }
    }

    /// Record an answer and report whether the checklist is now complete.
    ///
    /// # Errors
    /// * `Locked` - If the checklist was locked by departure validation
    pub fn set_item(&mut self, item: ChecklistItem, answer: ChecklistAnswer) -> InspectionResult<bool> {
        if self.locked {
            return Err(InspectionError::Locked);
        }
        self.checklist.set(item, answer);
        Ok(self.is_complete())
    }

    /// Add `delta` to the key count, clamping at zero. Returns the new count.
    ///
    /// # Errors
    /// * `Locked` - If the checklist was locked by departure validation
    pub fn adjust_key_count(&mut self, delta: i32) -> InspectionResult<u32> {
        if self.locked {
            return Err(InspectionError::Locked);
        }
        let next = i64::from(self.checklist.key_count) + i64::from(delta);
        self.checklist.key_count = next.clamp(0, i64::from(u32::MAX)) as u32;
        Ok(self.checklist.key_count)
    }

    pub fn is_complete(&self) -> bool {
        self.check_complete().is_ok()
    }

    /// Same as `is_complete`, but explains what is missing.
    pub fn check_complete(&self) -> InspectionResult<()> {
        let missing = self.checklist.unset_items();
        let key_count_missing = self.require_key_count && self.checklist.key_count == 0;
        if missing.is_empty() && !key_count_missing {
            return Ok(());
        }
        Err(InspectionError::ChecklistIncomplete {
            missing,
            key_count_missing,
        })
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CHECKLIST_ITEMS;

    fn slots(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_capture_reports_first_capture() {
        let mut ledger = PhotoLedger::new();
        assert!(ledger.capture(Phase::Departure, "compteur", PhotoRef::new("a")).unwrap());
        assert!(!ledger.capture(Phase::Departure, "compteur", PhotoRef::new("b")).unwrap());
    }

    #[test]
    fn test_recapture_overwrites() {
        let mut ledger = PhotoLedger::new();
        ledger.capture(Phase::Arrival, "compteur", PhotoRef::new("a")).unwrap();
        ledger.capture(Phase::Arrival, "compteur", PhotoRef::new("b")).unwrap();

        let capture = ledger.get(Phase::Arrival, "compteur").unwrap();
        assert_eq!(capture.reference, PhotoRef::new("b"));
        assert_eq!(ledger.captures(Phase::Arrival).len(), 1);
    }

    #[test]
    fn test_phases_are_separate() {
        let mut ledger = PhotoLedger::new();
        ledger.capture(Phase::Departure, "compteur", PhotoRef::new("a")).unwrap();
        assert!(ledger.is_captured(Phase::Departure, "compteur"));
        assert!(!ledger.is_captured(Phase::Arrival, "compteur"));
    }

    #[test]
    fn test_missing_slots_keeps_declared_order() {
        let required = slots(&["compteur", "face-avant", "moteur", "carnet"]);
        let mut ledger = PhotoLedger::new();
        ledger.capture(Phase::Departure, "moteur", PhotoRef::new("m")).unwrap();
        ledger.capture(Phase::Departure, "compteur", PhotoRef::new("c")).unwrap();

        assert_eq!(
            ledger.missing_slots(Phase::Departure, &required),
            slots(&["face-avant", "carnet"])
        );
        assert_eq!(ledger.captured_count(Phase::Departure, &required), 2);
    }

    #[test]
    fn test_locked_departure_refuses_writes() {
        let mut ledger = PhotoLedger::new();
        ledger.capture(Phase::Departure, "moteur", PhotoRef::new("before")).unwrap();
        ledger.lock_departure();

        assert_eq!(
            ledger.capture(Phase::Departure, "moteur", PhotoRef::new("after")),
            Err(InspectionError::Locked)
        );
        assert_eq!(ledger.get(Phase::Departure, "moteur").unwrap().reference, PhotoRef::new("before"));
        assert!(ledger.capture(Phase::Arrival, "moteur", PhotoRef::new("arr")).is_ok());
    }

    #[test]
    fn test_checklist_completion() {
        let mut ledger = ChecklistLedger::new(true);
        for item in CHECKLIST_ITEMS {
            ledger.set_item(*item, ChecklistAnswer::Yes).unwrap();
        }
        assert!(!ledger.is_complete());

        ledger.adjust_key_count(1).unwrap();
        assert!(ledger.is_complete());
    }

    #[test]
    fn test_checklist_completion_without_key_requirement() {
        let mut ledger = ChecklistLedger::new(false);
        let mut complete = false;
        for item in CHECKLIST_ITEMS {
            complete = ledger.set_item(*item, ChecklistAnswer::No).unwrap();
        }
        assert!(complete);
    }

    #[test]
    fn test_check_complete_explains() {
        let mut ledger = ChecklistLedger::new(true);
        ledger.set_item(ChecklistItem::Gps, ChecklistAnswer::Yes).unwrap();
        match ledger.check_complete() {
            Err(InspectionError::ChecklistIncomplete { missing, key_count_missing }) => {
                assert_eq!(missing.len(), 4);
                assert!(!missing.contains(&ChecklistItem::Gps));
                assert!(key_count_missing);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_key_count_not_reported_when_optional() {
        let ledger = ChecklistLedger::new(false);
        let err = ledger.check_complete().unwrap_err();
        assert_eq!(
            err,
            InspectionError::ChecklistIncomplete {
                missing: CHECKLIST_ITEMS.to_vec(),
                key_count_missing: false,
            }
        );
        assert_eq!(
            err.to_string(),
            "Checklist incomplete: vehiclePapers, gps, sdCard, safetyKit, spareWheel"
        );
    }

    #[test]
    fn test_key_count_clamps_at_zero() {
        let mut ledger = ChecklistLedger::new(true);
        assert_eq!(ledger.adjust_key_count(2).unwrap(), 2);
        assert_eq!(ledger.adjust_key_count(-5).unwrap(), 0);
        assert_eq!(ledger.adjust_key_count(-1).unwrap(), 0);
    }

    #[test]
    fn test_locked_checklist_is_unchanged() {
        let mut ledger = ChecklistLedger::new(true);
        ledger.adjust_key_count(1).unwrap();
        ledger.lock();
        let before = ledger.checklist().clone();

        assert_eq!(ledger.set_item(ChecklistItem::Gps, ChecklistAnswer::Yes), Err(InspectionError::Locked));
        assert_eq!(ledger.adjust_key_count(3), Err(InspectionError::Locked));
        assert_eq!(ledger.checklist(), &before);
    }
}
