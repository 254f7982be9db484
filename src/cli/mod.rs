//! CLI module for edl
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// edl - Drive vehicle handover inspections (état des lieux) from the shell
#[derive(Parser, Debug)]
#[command(name = "edl")]
#[command(version)]
#[command(about = "Drive vehicle handover inspections (état des lieux) from the shell")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .edl data directory with the default inspection policy
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },

    /// Create a pending mission and print its code
    Create {
        /// Read the creation form from a JSON file (camelCase keys)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Vehicle brand
        #[arg(long)]
        brand: Option<String>,

        /// Vehicle model
        #[arg(long)]
        model: Option<String>,

        /// License plate
        #[arg(long)]
        plate: Option<String>,

        /// Client name
        #[arg(long)]
        client: Option<String>,

        /// Provider name
        #[arg(long)]
        provider: Option<String>,

        /// Urgency level
        #[arg(long)]
        urgency: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count missions per status
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a mission and the phase its inspection opens in
    Show {
        /// Mission code
        code: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show client tracking status for a mission
    Track {
        /// Mission code
        code: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a mission and apply a JSON array of inspection events
    Replay {
        /// Mission code
        code: String,

        /// Path to the events file
        events: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
