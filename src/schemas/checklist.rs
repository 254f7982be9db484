//! Checklist schema - The fixed departure checklist

use serde::{Deserialize, Serialize};

use crate::errors::InspectionError;

/// One of the five fixed checklist keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistItem {
    VehiclePapers,
    Gps,
    SdCard,
    SafetyKit,
    SpareWheel,
}

/// Declared order of checklist keys
pub const CHECKLIST_ITEMS: &[ChecklistItem] = &[
    ChecklistItem::VehiclePapers,
    ChecklistItem::Gps,
    ChecklistItem::SdCard,
    ChecklistItem::SafetyKit,
    ChecklistItem::SpareWheel,
];

impl std::fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistItem::VehiclePapers => write!(f, "vehiclePapers"),
            ChecklistItem::Gps => write!(f, "gps"),
            ChecklistItem::SdCard => write!(f, "sdCard"),
            ChecklistItem::SafetyKit => write!(f, "safetyKit"),
            ChecklistItem::SpareWheel => write!(f, "spareWheel"),
        }
    }
}

impl std::str::FromStr for ChecklistItem {
    type Err = InspectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vehiclePapers" => Ok(ChecklistItem::VehiclePapers),
            "gps" => Ok(ChecklistItem::Gps),
            "sdCard" => Ok(ChecklistItem::SdCard),
            "safetyKit" => Ok(ChecklistItem::SafetyKit),
            "spareWheel" => Ok(ChecklistItem::SpareWheel),
            _ => Err(InspectionError::UnknownChecklistItem(s.to_string())),
        }
    }
}

/// Value selected for a checklist key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistAnswer {
    /// Item present and handed over
    Yes,
    /// Item absent
    No,
    /// Item does not apply to this vehicle
    NotApplicable,
}

/// Fixed-shape checklist record: five keys plus the number of keys handed over.
///
/// A key counts as set once any answer has been selected, including `No`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Checklist {
    #[serde(default)]
    pub vehicle_papers: Option<ChecklistAnswer>,
    #[serde(default)]
    pub gps: Option<ChecklistAnswer>,
    #[serde(default)]
    pub sd_card: Option<ChecklistAnswer>,
    #[serde(default)]
    pub safety_kit: Option<ChecklistAnswer>,
    #[serde(default)]
    pub spare_wheel: Option<ChecklistAnswer>,
    #[serde(default)]
    pub key_count: u32,
}

impl Checklist {
    /// Read the answer recorded for a key
    pub fn get(&self, item: ChecklistItem) -> Option<ChecklistAnswer> {
        match item {
            ChecklistItem::VehiclePapers => self.vehicle_papers,
            ChecklistItem::Gps => self.gps,
            ChecklistItem::SdCard => self.sd_card,
            ChecklistItem::SafetyKit => self.safety_kit,
            ChecklistItem::SpareWheel => self.spare_wheel,
        }
    }

    /// Record an answer for a key, replacing any earlier one
    pub fn set(&mut self, item: ChecklistItem, answer: ChecklistAnswer) {
        let slot = match item {
            ChecklistItem::VehiclePapers => &mut self.vehicle_papers,
            ChecklistItem::Gps => &mut self.gps,
            ChecklistItem::SdCard => &mut self.sd_card,
            ChecklistItem::SafetyKit => &mut self.safety_kit,
            ChecklistItem::SpareWheel => &mut self.spare_wheel,
        };
        *slot = Some(answer);
    }

    /// Keys with no answer yet, in declared order
    pub fn unset_items(&self) -> Vec<ChecklistItem> {
        CHECKLIST_ITEMS
            .iter()
            .copied()
            .filter(|item| self.get(*item).is_none())
            .collect()
    }
}
