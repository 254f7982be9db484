//! Mission schema - The vehicle transfer job an inspection belongs to

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{EdlError, Result};

lazy_static! {
    static ref MISSION_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z0-9-]{4,32}$").expect("mission code pattern is valid");
}

/// Normalize a typed or scanned mission code (trim, uppercase) and check its format.
///
/// # Errors
/// * `InvalidMissionCode` - If the code has characters outside `A-Z0-9-` or a bad length
pub fn normalize_mission_code(raw: &str) -> Result<String> {
    let code = raw.trim().to_uppercase();
    if !MISSION_CODE_REGEX.is_match(&code) {
        return Err(EdlError::InvalidMissionCode(raw.to_string()));
    }
    Ok(code)
}

/// Server-side lifecycle status of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    /// Created, provider has not started
    Pending,
    /// Departure inspection under way
    InProgress,
    /// Departure inspection validated and locked
    DepartureValidated,
    /// Arrival inspection finalized
    Completed,
    /// Cancelled by the back office
    Cancelled,
}

impl MissionStatus {
    /// User-facing label shown on mission cards and tracking pages
    pub fn label(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "En attente",
            MissionStatus::InProgress => "En cours",
            MissionStatus::DepartureValidated => "Départ validé",
            MissionStatus::Completed => "Terminée",
            MissionStatus::Cancelled => "Annulée",
        }
    }

    /// Step (1..=4) on the client tracking progress bar
    pub fn tracking_step(&self) -> u8 {
        match self {
            MissionStatus::Pending | MissionStatus::Cancelled => 1,
            MissionStatus::InProgress => 2,
            MissionStatus::DepartureValidated => 3,
            MissionStatus::Completed => 4,
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionStatus::Pending => write!(f, "pending"),
            MissionStatus::InProgress => write!(f, "in_progress"),
            MissionStatus::DepartureValidated => write!(f, "departure_validated"),
            MissionStatus::Completed => write!(f, "completed"),
            MissionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for MissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MissionStatus::Pending),
            "in_progress" => Ok(MissionStatus::InProgress),
            "departure_validated" => Ok(MissionStatus::DepartureValidated),
            "completed" => Ok(MissionStatus::Completed),
            "cancelled" => Ok(MissionStatus::Cancelled),
            _ => Err(format!("Unknown mission status: {}", s)),
        }
    }
}

/// A vehicle transfer job, as returned by mission lookup.
///
/// Descriptive fields are carried for display only; the inspection core
/// reads nothing but `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Backend identifier
    pub id: String,

    /// Code shared with the provider and the client
    #[serde(rename = "mission_code", alias = "code")]
    pub code: String,

    /// Current lifecycle status
    pub status: MissionStatus,

    #[serde(default)]
    pub vehicle_brand: Option<String>,

    #[serde(default)]
    pub vehicle_model: Option<String>,

    #[serde(default)]
    pub vehicle_year: Option<String>,

    #[serde(default)]
    pub license_plate: Option<String>,

    #[serde(default)]
    pub vin: Option<String>,

    #[serde(default)]
    pub mileage: Option<String>,

    #[serde(default)]
    pub pickup_location: Option<String>,

    #[serde(default)]
    pub delivery_location: Option<String>,

    #[serde(default)]
    pub pickup_date: Option<String>,

    #[serde(default)]
    pub delivery_date: Option<String>,

    /// Urgency level ("normal" unless set)
    #[serde(default = "default_urgency")]
    pub urgency: String,

    #[serde(default)]
    pub client_name: Option<String>,

    #[serde(default)]
    pub client_email: Option<String>,

    #[serde(default)]
    pub client_phone: Option<String>,

    #[serde(default)]
    pub client_company: Option<String>,

    #[serde(default)]
    pub provider_name: Option<String>,

    #[serde(default)]
    pub provider_email: Option<String>,

    #[serde(default)]
    pub provider_phone: Option<String>,

    /// Free text entered when the mission was created
    #[serde(default)]
    pub observations: Option<String>,

    /// Back-office notes, never shown to the client
    #[serde(default)]
    pub internal_notes: Option<String>,

    /// ISO 8601 creation timestamp
    pub created_at: String,

    /// ISO 8601 last update timestamp
    pub updated_at: String,
}

fn default_urgency() -> String {
    "normal".to_string()
}

impl Mission {
    /// Create a pending mission with no descriptive fields
    pub fn new(id: String, code: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Mission {
            id,
            code,
            status: MissionStatus::Pending,
            vehicle_brand: None,
            vehicle_model: None,
            vehicle_year: None,
            license_plate: None,
            vin: None,
            mileage: None,
            pickup_location: None,
            delivery_location: None,
            pickup_date: None,
            delivery_date: None,
            urgency: default_urgency(),
            client_name: None,
            client_email: None,
            client_phone: None,
            client_company: None,
            provider_name: None,
            provider_email: None,
            provider_phone: None,
            observations: None,
            internal_notes: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Create a pending mission from a creation form
    pub fn from_draft(id: String, code: String, draft: NewMission) -> Self {
        let mut mission = Mission::new(id, code);
        mission.vehicle_brand = draft.vehicle_brand;
        mission.vehicle_model = draft.vehicle_model;
        mission.vehicle_year = draft.vehicle_year;
        mission.license_plate = draft.license_plate;
        mission.vin = draft.vin;
        mission.mileage = draft.mileage;
        mission.pickup_location = draft.pickup_location;
        mission.delivery_location = draft.delivery_location;
        mission.pickup_date = draft.pickup_date;
        mission.delivery_date = draft.delivery_date;
        if let Some(urgency) = draft.urgency.filter(|u| !u.trim().is_empty()) {
            mission.urgency = urgency;
        }
        mission.client_name = draft.client_name;
        mission.client_email = draft.client_email;
        mission.client_phone = draft.client_phone;
        mission.client_company = draft.client_company;
        mission.provider_name = draft.provider_name;
        mission.provider_email = draft.provider_email;
        mission.provider_phone = draft.provider_phone;
        mission.observations = draft.observations;
        mission.internal_notes = draft.internal_notes;
        mission
    }

    /// Return a new Mission with the given status, updating the timestamp
    pub fn with_status(mut self, status: MissionStatus) -> Self {
        self.status = status;
        self.updated_at = chrono::Utc::now().to_rfc3339();
        self
    }

    /// One-line vehicle description, e.g. "Peugeot 308 (2019)"
    pub fn vehicle_summary(&self) -> String {
        let brand = self.vehicle_brand.as_deref().unwrap_or("");
        let model = self.vehicle_model.as_deref().unwrap_or("");
        let year = self.vehicle_year.as_deref().unwrap_or("N/A");
        format!("{} {} ({})", brand, model, year).trim().to_string()
    }
}

/// Mission creation form, in the camelCase shape the back office posts.
///
/// Every field is optional; the backend assigns the id, the code and the
/// `pending` status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMission {
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub license_plate: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<String>,
    pub pickup_location: Option<String>,
    pub delivery_location: Option<String>,
    pub pickup_date: Option<String>,
    pub delivery_date: Option<String>,
    pub urgency: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub provider_name: Option<String>,
    pub provider_email: Option<String>,
    pub provider_phone: Option<String>,
    pub observations: Option<String>,
    pub internal_notes: Option<String>,
}

/// Code for the `sequence`-th mission of a backend, e.g. `MIS-0007`.
///
/// # Errors
/// * `InvalidMissionCode` - If the sequence no longer fits the code format
pub fn mission_code_for(sequence: u64) -> Result<String> {
    normalize_mission_code(&format!("MIS-{:04}", sequence))
}

/// Mission counts per status, as shown on the back-office dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub departure_validated: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl MissionStats {
    pub fn tally<'a>(missions: impl IntoIterator<Item = &'a Mission>) -> Self {
        let mut stats = MissionStats::default();
        for mission in missions {
            stats.total += 1;
            match mission.status {
                MissionStatus::Pending => stats.pending += 1,
                MissionStatus::InProgress => stats.in_progress += 1,
                MissionStatus::DepartureValidated => stats.departure_validated += 1,
                MissionStatus::Completed => stats.completed += 1,
                MissionStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }

    pub fn count(&self, status: MissionStatus) -> usize {
        match status {
            MissionStatus::Pending => self.pending,
            MissionStatus::InProgress => self.in_progress,
            MissionStatus::DepartureValidated => self.departure_validated,
            MissionStatus::Completed => self.completed,
            MissionStatus::Cancelled => self.cancelled,
        }
    }
}
