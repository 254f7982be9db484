//! edl - Vehicle handover inspection (état des lieux) workflow
//!
//! This library provides:
//! - The inspection core: phases, checklist and photo ledgers, and the
//!   finalization gate deciding when departure can be validated and the
//!   mission finalized
//! - Schema definitions for missions, the checklist and inspection policy
//! - A mission backend contract with in-memory and JSON-file implementations
//! - A workflow driver binding one live session to a backend
//! - The `edl` command-line interface

pub mod backend;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod workflow;

// Re-export commonly used types
pub use domain::{InspectionEvent, InspectionSession, Phase, PhotoRef, Transition};
pub use errors::{EdlError, InspectionError, Result};
pub use schemas::{InspectionConfig, Mission, MissionStatus};
pub use workflow::{EventOutcome, InspectionWorkflow};
