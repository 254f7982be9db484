//! Config schema - Required photo sets and checklist policy

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::Phase;
use crate::errors::{EdlError, Result};

const DEFAULT_DEPARTURE_SLOTS: &[&str] = &[
    "compteur",
    "face-avant",
    "face-arriere",
    "cote-gauche",
    "cote-droit",
    "moteur",
    "carnet",
    "interieur",
    "coffre",
    "jantes",
];

const DEFAULT_ARRIVAL_SLOTS: &[&str] = &["compteur", "face-avant", "face-arriere"];

/// Inspection policy loaded from `.edl/config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionConfig {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Required departure photo slots, in display order
    #[serde(default = "default_departure_slots")]
    pub departure_slots: Vec<String>,

    /// Required arrival photo slots, in display order
    #[serde(default = "default_arrival_slots")]
    pub arrival_slots: Vec<String>,

    /// Extra slots accepted in either phase but never required
    #[serde(default)]
    pub optional_slots: Vec<String>,

    /// Whether at least one key must be handed over for the checklist to be complete
    #[serde(default = "default_require_key_count")]
    pub require_key_count: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_departure_slots() -> Vec<String> {
    DEFAULT_DEPARTURE_SLOTS.iter().map(|s| s.to_string()).collect()
}

fn default_arrival_slots() -> Vec<String> {
    DEFAULT_ARRIVAL_SLOTS.iter().map(|s| s.to_string()).collect()
}

fn default_require_key_count() -> bool {
    true
}

impl Default for InspectionConfig {
    fn default() -> Self {
        InspectionConfig {
            schema_version: 1,
            departure_slots: default_departure_slots(),
            arrival_slots: default_arrival_slots(),
            optional_slots: Vec::new(),
            require_key_count: true,
        }
    }
}

impl InspectionConfig {
    /// Policy where one slot set is required at both departure and arrival
    pub fn shared_slots(slots: Vec<String>) -> Self {
        InspectionConfig {
            departure_slots: slots.clone(),
            arrival_slots: slots,
            ..Default::default()
        }
    }

    /// Required slots for a phase. `Completed` requires nothing further.
    pub fn required_slots(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Departure => &self.departure_slots,
            Phase::Arrival => &self.arrival_slots,
            Phase::Completed => &[],
        }
    }

    /// Whether a slot id may be captured in a phase. Nothing is captured once completed.
    pub fn accepts_slot(&self, phase: Phase, slot: &str) -> bool {
        if phase == Phase::Completed {
            return false;
        }
        self.required_slots(phase).iter().any(|s| s == slot)
            || self.optional_slots.iter().any(|s| s == slot)
    }

    /// Reject empty, blank or duplicated slot lists
    pub fn validate(&self) -> Result<()> {
        check_slot_list("departure_slots", &self.departure_slots, false)?;
        check_slot_list("arrival_slots", &self.arrival_slots, false)?;
        check_slot_list("optional_slots", &self.optional_slots, true)?;
        Ok(())
    }
}

fn check_slot_list(name: &str, slots: &[String], allow_empty: bool) -> Result<()> {
    if slots.is_empty() && !allow_empty {
        return Err(EdlError::ConfigError(format!("{} must not be empty", name)));
    }
    let mut seen = HashSet::new();
    for slot in slots {
        if slot.trim().is_empty() {
            return Err(EdlError::ConfigError(format!("{} contains a blank slot id", name)));
        }
        if !seen.insert(slot.as_str()) {
            return Err(EdlError::ConfigError(format!(
                "{} lists '{}' more than once",
                name, slot
            )));
        }
    }
    Ok(())
}
