//! Error types for the inspection workflow
//!
//! Domain rejections (`InspectionError`) are returned as values by every gated
//! operation. Crate-level failures (`EdlError`) cover lookups, storage and
//! configuration. Each variant has an error code for programmatic handling.

use thiserror::Error;

use crate::domain::Phase;
use crate::schemas::ChecklistItem;

/// Result type alias for edl operations
pub type Result<T> = std::result::Result<T, EdlError>;

/// Result type alias for session operations
pub type InspectionResult<T> = std::result::Result<T, InspectionError>;

/// Why the workflow core refused an action.
///
/// None of these are fatal: the session is left exactly as it was before the
/// rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectionError {
    /// Checklist keys unset, or no keys handed over while the policy requires some
    #[error("Checklist incomplete: {}", describe_checklist(.missing, .key_count_missing))]
    ChecklistIncomplete {
        missing: Vec<ChecklistItem>,
        key_count_missing: bool,
    },

    /// Required photo slots still empty for the phase
    #[error("Missing {phase} photos: {}", join_slots(.slots))]
    MissingPhotos { phase: Phase, slots: Vec<String> },

    /// Arrival requested before departure validation, or departure revisited after it
    #[error("Phase locked: departure must be validated before arrival, and cannot be reopened afterwards")]
    PhaseLocked,

    /// Write attempted on departure data after validation
    #[error("Departure data is locked after validation")]
    Locked,

    /// Finalize attempted before departure validation
    #[error("Departure has not been validated")]
    DepartureNotValidated,

    /// Arrival-only action attempted outside of arrival
    #[error("Action requires the {expected} phase (current phase: {actual})")]
    WrongPhase { expected: Phase, actual: Phase },

    /// Finalize attempted without a signature
    #[error("Client signature required")]
    MissingSignature,

    /// Mutation attempted after the session was finalized
    #[error("Inspection already completed")]
    SessionCompleted,

    /// Phase change that is never requestable directly
    #[error("Cannot move from {from} to {to}")]
    IllegalTransition { from: Phase, to: Phase },

    /// Photo slot not configured for the phase
    #[error("Unknown {phase} photo slot: {slot}")]
    UnknownSlot { phase: Phase, slot: String },

    /// Checklist key outside the fixed set
    #[error("Unknown checklist item: {0}")]
    UnknownChecklistItem(String),
}

fn describe_checklist(missing: &[ChecklistItem], key_count_missing: &bool) -> String {
    let mut parts: Vec<String> = missing.iter().map(|item| item.to_string()).collect();
    if *key_count_missing {
        parts.push("keyCount".to_string());
    }
    parts.join(", ")
}

fn join_slots(slots: &[String]) -> String {
    slots.join(", ")
}

impl InspectionError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            InspectionError::ChecklistIncomplete { .. } => "CHECKLIST_INCOMPLETE",
            InspectionError::MissingPhotos { .. } => "MISSING_PHOTOS",
            InspectionError::PhaseLocked => "PHASE_LOCKED",
            InspectionError::Locked => "LOCKED",
            InspectionError::DepartureNotValidated => "DEPARTURE_NOT_VALIDATED",
            InspectionError::WrongPhase { .. } => "WRONG_PHASE",
            InspectionError::MissingSignature => "MISSING_SIGNATURE",
            InspectionError::SessionCompleted => "SESSION_COMPLETED",
            InspectionError::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            InspectionError::UnknownSlot { .. } => "UNKNOWN_SLOT",
            InspectionError::UnknownChecklistItem(_) => "UNKNOWN_CHECKLIST_ITEM",
        }
    }
}

/// Main error type for everything outside the in-memory session
#[derive(Debug, Error)]
pub enum EdlError {
    /// Mission lookup returned nothing
    #[error("Mission not found: {0}")]
    NotFound(String),

    /// Mission code failed format validation
    #[error("Invalid mission code: {0}")]
    InvalidMissionCode(String),

    /// Cancelled missions cannot be inspected
    #[error("Mission {0} is cancelled")]
    MissionCancelled(String),

    /// Event delivered with no mission loaded
    #[error("No inspection session is open")]
    NoActiveSession,

    /// Collaborator I/O failure (network or storage)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No .edl data directory above the working directory
    #[error("Data directory not found: {0}")]
    DataDirNotFound(String),

    /// Domain rejection surfaced through a fallible API
    #[error(transparent)]
    Inspection(#[from] InspectionError),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EdlError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            EdlError::NotFound(_) => "NOT_FOUND",
            EdlError::InvalidMissionCode(_) => "INVALID_MISSION_CODE",
            EdlError::MissionCancelled(_) => "MISSION_CANCELLED",
            EdlError::NoActiveSession => "NO_ACTIVE_SESSION",
            EdlError::Backend(_) => "BACKEND_ERROR",
            EdlError::InvalidJson(_) => "INVALID_JSON",
            EdlError::FileNotFound(_) => "FILE_NOT_FOUND",
            EdlError::ConfigError(_) => "CONFIG_ERROR",
            EdlError::DataDirNotFound(_) => "DATA_DIR_NOT_FOUND",
            EdlError::Inspection(inner) => inner.code(),
            EdlError::Io(_) => "IO_ERROR",
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &EdlError) -> i32 {
    match error {
        EdlError::NotFound(_) => 3,
        EdlError::Inspection(_) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspection_error_codes() {
        assert_eq!(InspectionError::PhaseLocked.code(), "PHASE_LOCKED");
        assert_eq!(InspectionError::Locked.code(), "LOCKED");
        assert_eq!(InspectionError::MissingSignature.code(), "MISSING_SIGNATURE");
        assert_eq!(InspectionError::DepartureNotValidated.code(), "DEPARTURE_NOT_VALIDATED");
        assert_eq!(
            InspectionError::MissingPhotos { phase: Phase::Arrival, slots: vec![] }.code(),
            "MISSING_PHOTOS"
        );
    }

    #[test]
    fn test_edl_error_codes() {
        assert_eq!(EdlError::NotFound("ABCD".into()).code(), "NOT_FOUND");
        assert_eq!(EdlError::Backend("down".into()).code(), "BACKEND_ERROR");
        assert_eq!(EdlError::NoActiveSession.code(), "NO_ACTIVE_SESSION");
        assert_eq!(EdlError::from(InspectionError::Locked).code(), "LOCKED");
    }

    #[test]
    fn test_missing_photos_message_lists_slots() {
        let err = InspectionError::MissingPhotos {
            phase: Phase::Departure,
            slots: vec!["compteur".to_string(), "moteur".to_string()],
        };
        assert_eq!(err.to_string(), "Missing departure photos: compteur, moteur");
    }

    #[test]
    fn test_checklist_message_mentions_keys() {
        let err = InspectionError::ChecklistIncomplete {
            missing: vec![ChecklistItem::Gps],
            key_count_missing: true,
        };
        let message = err.to_string();
        assert!(message.contains("gps"));
        assert!(message.contains("keyCount"));

        let err = InspectionError::ChecklistIncomplete {
            missing: vec![ChecklistItem::Gps, ChecklistItem::SdCard],
            key_count_missing: false,
        };
        assert_eq!(err.to_string(), "Checklist incomplete: gps, sdCard");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&EdlError::NotFound("X".into())), 3);
        assert_eq!(to_exit_code(&EdlError::Inspection(InspectionError::Locked)), 2);
        assert_eq!(to_exit_code(&EdlError::Backend("x".into())), 1);
    }
}
