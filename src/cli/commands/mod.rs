//! CLI command implementations

pub mod create;
pub mod init;
pub mod replay;
pub mod show;
pub mod stats;
pub mod track;
